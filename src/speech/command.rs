//! Command line construction for the speech executable

/// Flag that precedes the quoted text argument
const TEXT_FLAG: &str = " -t \"";

/// A command line for the speech executable, as UTF-16 code units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(Vec<u16>);

impl CommandLine {
    /// Raw UTF-16 code units
    #[must_use]
    pub fn as_wide(&self) -> &[u16] {
        &self.0
    }

    /// Command line as a string, with unpaired surrogates replaced
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }

    /// Split into arguments
    ///
    /// Whitespace separates arguments and double quotes group them. Quotes are
    /// not escapable, matching how the line is built.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let line = self.to_string_lossy();
        let mut args = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut pending = false;

        for c in line.chars() {
            match c {
                '"' => {
                    in_quotes = !in_quotes;
                    pending = true;
                }
                c if c.is_whitespace() && !in_quotes => {
                    if pending {
                        args.push(std::mem::take(&mut current));
                        pending = false;
                    }
                }
                c => {
                    current.push(c);
                    pending = true;
                }
            }
        }
        if pending {
            args.push(current);
        }

        args
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// Build `<cmd> -t "<payload>"`
///
/// The payload is inserted as is. A `"` inside it ends the quoted argument
/// early, so the executable will see a different argument split.
#[must_use]
pub fn build_command_line(cmd: &str, payload: &[u16]) -> CommandLine {
    let mut line: Vec<u16> = Vec::with_capacity(cmd.len() + TEXT_FLAG.len() + payload.len() + 1);
    line.extend(cmd.encode_utf16());
    line.extend(TEXT_FLAG.encode_utf16());
    line.extend_from_slice(payload);
    line.push(u16::from(b'"'));
    CommandLine(line)
}
