use std::fmt;
use std::path::PathBuf;

/// Placeholder printed for an unnamed first definition.
pub const ANONYMOUS_OPERATION: &str = "<anonymous>";

/// One selection of the target field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub path: PathBuf,
    /// Line of the enclosing literal, not of the field itself
    pub line: u32,
    /// Name of the literal's first definition (operation or fragment)
    pub operation_name: Option<String>,
}

impl UsageRecord {
    #[must_use]
    pub fn operation_name_or_anonymous(&self) -> &str {
        self.operation_name.as_deref().unwrap_or(ANONYMOUS_OPERATION)
    }

    /// Render this record in `format`.
    #[must_use]
    pub fn display(&self, format: OutputFormat) -> DisplayUsage<'_> {
        DisplayUsage {
            record: self,
            format,
        }
    }
}

/// How usage records are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `path:line operationName`
    #[default]
    Line,
    /// `path#Lline`, a fragment that code hosts resolve to the line
    Anchor,
}

pub struct DisplayUsage<'a> {
    record: &'a UsageRecord,
    format: OutputFormat,
}

impl fmt::Display for DisplayUsage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.record.path.display();
        match self.format {
            OutputFormat::Line => write!(
                f,
                "{path}:{} {}",
                self.record.line,
                self.record.operation_name_or_anonymous()
            ),
            OutputFormat::Anchor => write!(f, "{path}#L{}", self.record.line),
        }
    }
}

/// Render `records` one per line, each line newline-terminated.
#[must_use]
pub fn render(records: &[UsageRecord], format: OutputFormat) -> String {
    records
        .iter()
        .map(|record| format!("{}\n", record.display(format)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<UsageRecord> {
        vec![
            UsageRecord {
                path: PathBuf::from("src/user.ts"),
                line: 10,
                operation_name: Some("GetUser".to_string()),
            },
            UsageRecord {
                path: PathBuf::from("src/feed.tsx"),
                line: 3,
                operation_name: None,
            },
        ]
    }

    #[test]
    fn test_render_line_format() {
        assert_eq!(
            render(&records(), OutputFormat::Line),
            "src/user.ts:10 GetUser\nsrc/feed.tsx:3 <anonymous>\n"
        );
    }

    #[test]
    fn test_render_anchor_format() {
        assert_eq!(
            render(&records(), OutputFormat::Anchor),
            "src/user.ts#L10\nsrc/feed.tsx#L3\n"
        );
    }

    #[test]
    fn test_display_single_record() {
        let records = records();
        insta::assert_snapshot!(records[0].display(OutputFormat::Line).to_string(), @"src/user.ts:10 GetUser");
        insta::assert_snapshot!(records[1].display(OutputFormat::Anchor).to_string(), @"src/feed.tsx#L3");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[], OutputFormat::Line), "");
    }
}
