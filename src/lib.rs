#![allow(clippy::module_inception)]

use std::{ops::Range, rc::Rc, time::Instant};

use tracing::{debug, trace};

use crate::{
    analyzer::analyzer::analyze,
    errors::errors::{Error, ErrorTip},
    generator::generator::generate,
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
};

pub mod analyzer;
pub mod cst;
pub mod errors;
pub mod generator;
pub mod ir;
pub mod lexer;
pub mod macros;
pub mod optimizer;
pub mod parser;
pub mod types;

extern crate regex;

/// Extension used for generated files.
pub const TARGET_EXTENSION: &str = "js";

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Byte range of the span inside its source.
    pub fn range(&self) -> Range<usize> {
        self.start.0 as usize..self.end.0 as usize
    }
}

/// Settings for a single run of the pipeline.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Run the optimizer between analysis and generation.
    pub optimize: bool,
    /// Name reported in positions and diagnostics.
    pub file_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            optimize: true,
            file_name: String::from("shell"),
        }
    }
}

/// Runs the whole pipeline: tokenize, parse, analyze, optionally optimize, generate.
pub fn compile(source: &str, options: &CompileOptions) -> Result<String, Error> {
    let start = Instant::now();
    let file = Rc::new(options.file_name.clone());

    let tokens = tokenize(source.to_string(), Some(options.file_name.clone()))?;
    debug!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let tree = parse(tokens, Rc::new(source.to_string()), file)?;
    debug!("Parsed in {:?}", parse_start.elapsed());
    trace!("Parse tree:\n{}", tree.outline());

    let analyze_start = Instant::now();
    let program = analyze(&tree)?;
    debug!("Analyzed in {:?}", analyze_start.elapsed());

    let program = if options.optimize {
        let optimize_start = Instant::now();
        let program = optimize(program);
        debug!("Optimized in {:?}", optimize_start.elapsed());
        program
    } else {
        program
    };

    let generate_start = Instant::now();
    let output = generate(&program);
    debug!("Generated in {:?}", generate_start.elapsed());
    debug!("Total time: {:?}", start.elapsed());

    Ok(output)
}

/// Finds the line containing a byte offset.
///
/// Returns the 1-based line number, the line text and the offset of `position`
/// within that line. Offsets at the very end of the source map onto the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // End of input: point just past the last character.
    let last = source.split_inclusive('\n').last().unwrap_or("");
    let line_number = line_number.saturating_sub(1).max(1);
    Some((line_number, last.to_string(), last.trim_end_matches('\n').len()))
}

/// Formats an error as a caret diagnostic.
///
/// ```text
/// Error: TypeMismatch (Expected type `int`, received `float`)
/// -> prog.con:1:10
///   |
/// 1 | int x := 1.0f;
///   | ---------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        rendered.push_str(&format!("-> {}\n", position.1));
        return rendered;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("-> {}:{}:{}\n", position.1, line, line_pos + 1));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();
    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\nbar\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 30).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, line_pos) = super::get_line_at_position("int x", 5).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "int x");
        assert_eq!(line_pos, 5);

        assert!(super::get_line_at_position("int x", 6).is_none());
    }

    #[test]
    fn test_render_error_points_at_column() {
        let source = "int x := 1;\n  break;\n";
        let error = Error::new(ErrorImpl::BreakOutsideLoop, Position(14, Rc::new(String::from("test.con"))));

        let rendered = super::render_error(&error, source);
        assert!(rendered.starts_with("Error: BreakOutsideLoop"));
        assert!(rendered.contains("-> test.con:2:3"));
        assert!(rendered.contains("2 | break;"));
        assert!(rendered.ends_with("| ^"));
    }
}
