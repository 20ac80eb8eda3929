/// Interactive console for prompt-driven commands
///
/// The console wraps a reader/writer pair so the same code drives a terminal
/// (`Console::stdio()`) and in-memory buffers in tests. Commands declare the
/// parameters they need as a slice of [`Param`]; [`Console::collect`] prompts
/// for each of them in order and returns typed [`Params`].
///
/// # Example
///
/// ```
/// use dbdesk_shared::{Console, InvalidInputPolicy, Param};
/// use std::io::Cursor;
///
/// let mut console = Console::new(Cursor::new(b"7\n".to_vec()), Vec::new());
/// let params = console
///     .collect(&[Param::integer("user id", "Specify the user ID: ")], InvalidInputPolicy::Abort)
///     .unwrap();
/// assert_eq!(params.int(0).unwrap(), 7);
/// ```
use crate::error::InputError;
use std::fmt;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// How a parameter's raw text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free text, taken as typed
    Text,

    /// A 32-bit signed integer
    Integer,

    /// A list split on the delimiter, each entry trimmed, empty entries dropped
    List {
        /// Separator between entries
        delimiter: char,
    },
}

/// A parameter a command prompts for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Short name used in error messages
    pub name: &'static str,

    /// Prompt shown to the user
    pub prompt: &'static str,

    /// How the answer is parsed
    pub kind: ParamKind,
}

impl Param {
    pub const fn text(name: &'static str, prompt: &'static str) -> Self {
        Param {
            name,
            prompt,
            kind: ParamKind::Text,
        }
    }

    pub const fn integer(name: &'static str, prompt: &'static str) -> Self {
        Param {
            name,
            prompt,
            kind: ParamKind::Integer,
        }
    }

    pub const fn list(name: &'static str, prompt: &'static str, delimiter: char) -> Self {
        Param {
            name,
            prompt,
            kind: ParamKind::List { delimiter },
        }
    }
}

/// What to do when an integer parameter receives non-numeric text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputPolicy {
    /// Report the error and give up on the command
    Abort,

    /// Report the error and ask again until the value parses
    Reprompt,
}

/// A collected parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Int(i32),
    List(Vec<String>),
}

/// Parameter values in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<Value>);

impl Params {
    pub fn new(values: Vec<Value>) -> Self {
        Params(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the integer at `index`
    pub fn int(&self, index: usize) -> Result<i32, InputError> {
        match self.0.get(index) {
            Some(Value::Int(value)) => Ok(*value),
            _ => Err(InputError::MissingParameter { index }),
        }
    }

    /// Returns the text at `index`
    pub fn text(&self, index: usize) -> Result<&str, InputError> {
        match self.0.get(index) {
            Some(Value::Text(value)) => Ok(value),
            _ => Err(InputError::MissingParameter { index }),
        }
    }

    /// Returns the list at `index`
    pub fn list(&self, index: usize) -> Result<&[String], InputError> {
        match self.0.get(index) {
            Some(Value::List(values)) => Ok(values),
            _ => Err(InputError::MissingParameter { index }),
        }
    }
}

/// Splits `raw` on `delimiter`, trimming entries and dropping empty ones
pub fn split_list(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prompt-driven console over a reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    /// Console bound to the process's standard input and output
    pub fn stdio() -> Self {
        Console::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Writes one line
    pub fn say(&mut self, line: impl fmt::Display) -> Result<(), InputError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Shows `prompt` and reads one line, without its line terminator
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Closed`] when the input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // Bytes that are not UTF-8 become U+FFFD and fail parsing like any other text
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(InputError::Closed);
        }

        let line = String::from_utf8_lossy(&line);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompts for every parameter in order
    ///
    /// With [`InvalidInputPolicy::Abort`] the first non-integer answer to an
    /// integer parameter ends collection with an error. With
    /// [`InvalidInputPolicy::Reprompt`] the error is shown and the same prompt
    /// is repeated.
    pub fn collect(
        &mut self,
        params: &[Param],
        policy: InvalidInputPolicy,
    ) -> Result<Params, InputError> {
        let mut values = Vec::with_capacity(params.len());

        for param in params {
            let value = loop {
                let raw = self.ask(param.prompt)?;
                match parse_value(param, &raw) {
                    Ok(value) => break value,
                    Err(err) if policy == InvalidInputPolicy::Reprompt => self.say(&err)?,
                    Err(err) => return Err(err),
                }
            };
            values.push(value);
        }

        Ok(Params(values))
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn parse_value(param: &Param, raw: &str) -> Result<Value, InputError> {
    match param.kind {
        ParamKind::Text => Ok(Value::Text(raw.to_string())),
        ParamKind::Integer => raw
            .trim()
            .parse::<i32>()
            .map(Value::Int)
            .map_err(|_| InputError::NotAnInteger {
                field: param.name,
                value: raw.to_string(),
            }),
        ParamKind::List { delimiter } => Ok(Value::List(split_list(raw, delimiter))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).expect("utf-8 output")
    }

    #[test]
    fn test_ask_strips_line_terminator() {
        let mut console = console("Tom\r\n");
        assert_eq!(console.ask("Name: ").unwrap(), "Tom");
        assert_eq!(transcript(console), "Name: ");
    }

    #[test]
    fn test_ask_replaces_invalid_utf8() {
        let mut console = Console::new(Cursor::new(b"\xffTom\n".to_vec()), Vec::new());
        assert_eq!(console.ask("Name: ").unwrap(), "\u{FFFD}Tom");
    }

    #[test]
    fn test_ask_on_empty_input_is_closed() {
        let mut console = console("");
        assert!(matches!(console.ask("Name: "), Err(InputError::Closed)));
    }

    #[test]
    fn test_collect_mixed_params() {
        let mut console = console("42\nbuy milk\nfluffy; curious ;;\n");
        let params = console
            .collect(
                &[
                    Param::integer("user id", "id: "),
                    Param::text("title", "title: "),
                    Param::list("features", "features: ", ';'),
                ],
                InvalidInputPolicy::Abort,
            )
            .unwrap();

        assert_eq!(params.len(), 3);
        assert_eq!(params.int(0).unwrap(), 42);
        assert_eq!(params.text(1).unwrap(), "buy milk");
        assert_eq!(params.list(2).unwrap(), ["fluffy", "curious"]);
    }

    #[test]
    fn test_collect_abort_on_bad_integer() {
        let mut console = console("abc\nnever read\n");
        let result = console.collect(
            &[
                Param::integer("task id", "id: "),
                Param::text("status", "status: "),
            ],
            InvalidInputPolicy::Abort,
        );

        match result {
            Err(InputError::NotAnInteger { field, value }) => {
                assert_eq!(field, "task id");
                assert_eq!(value, "abc");
            }
            other => panic!("expected NotAnInteger, got {:?}", other),
        }
        assert!(!transcript(console).contains("status: "));
    }

    #[test]
    fn test_collect_reprompt_until_valid() {
        let mut console = console("three\n3\n");
        let params = console
            .collect(
                &[Param::integer("age", "age: ")],
                InvalidInputPolicy::Reprompt,
            )
            .unwrap();

        assert_eq!(params.int(0).unwrap(), 3);
        let out = transcript(console);
        assert_eq!(out.matches("age: ").count(), 2);
        assert!(out.contains("age must be an integer, got 'three'"));
    }

    #[test]
    fn test_collect_reprompt_stops_on_eof() {
        let mut console = console("x\n");
        let result = console.collect(
            &[Param::integer("age", "age: ")],
            InvalidInputPolicy::Reprompt,
        );
        assert!(matches!(result, Err(InputError::Closed)));
    }

    #[test]
    fn test_params_wrong_type_is_missing() {
        let params = Params::new(vec![Value::Text("x".to_string())]);
        assert!(matches!(
            params.int(0),
            Err(InputError::MissingParameter { index: 0 })
        ));
        assert!(matches!(
            params.text(1),
            Err(InputError::MissingParameter { index: 1 })
        ));
    }

    #[test]
    fn test_split_list_keeps_order() {
        assert_eq!(split_list(" b ;a;c", ';'), ["b", "a", "c"]);
        assert!(split_list("", ';').is_empty());
    }
}
