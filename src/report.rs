use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Health,
    Fixtures,
    Processing,
    Backend,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Check::Health => "service health",
            Check::Fixtures => "test files",
            Check::Processing => "processing workflow",
            Check::Backend => "backend integration",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct CheckRecord {
    pub check: Check,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: Vec<CheckRecord>,
    /// Set when fixture creation failed and the remaining checks never ran.
    pub aborted: bool,
}

impl RunReport {
    pub fn record(&mut self, check: Check, passed: bool, detail: impl Into<String>) {
        self.records.push(CheckRecord {
            check,
            passed,
            detail: detail.into(),
        });
    }

    pub fn passed(&self) -> usize {
        self.records.iter().filter(|r| r.passed).count()
    }

    pub fn attempted(&self) -> usize {
        self.records.len()
    }

    pub fn all_passed(&self) -> bool {
        !self.aborted && self.passed() == self.attempted()
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_passed() { 0 } else { 1 }
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "=".repeat(50),
            format!(
                "Test Results: {}/{} tests passed",
                self.passed(),
                self.attempted()
            ),
        ];
        for r in self.records.iter().filter(|r| !r.passed) {
            lines.push(format!("  FAILED {}: {}", r.check, r.detail));
        }
        if self.aborted {
            lines.push("Run aborted before all checks could execute".to_string());
        } else if self.all_passed() {
            lines.push("ALL TESTS PASSED - processing workflow is working correctly".to_string());
        } else {
            lines.push(format!(
                "{} tests failed - check configuration",
                self.attempted() - self.passed()
            ));
        }
        lines
    }
}
