//! Brainfuck to C translator
//!
//! ## Commands
//! - `>` : `ptr++;`
//! - `<` : `ptr--;`
//! - `+` : `(*ptr)++;`
//! - `-` : `(*ptr)--;`
//! - `.` : `putchar(*ptr);` (followed by `fflush(stdout);` when forced)
//! - `,` : `ch = getchar2();` then a store shaped by the EOF policy
//! - `[` : `while (*ptr) {`
//! - `]` : `}`
//!
//! Every other byte is a comment. Brackets are written out as they come, so
//! an unbalanced program turns into C that the C compiler rejects.

use std::io::{BufReader, Read, Write};

use log::{debug, trace};

use crate::config::{Config, EofPolicy};
use crate::error::Result;
use crate::escape::write_escaped;
use crate::scaffold;

/// Which operator classes showed up in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags {
    pub saw_input: bool,
    pub saw_output: bool,
}

/// Translates a whole program: preamble, body, epilogue, the input helper and
/// finally the command line scaffold of the generated program.
pub fn translate<R: Read, W: Write>(
    input: R,
    config: &Config,
    out: &mut W,
) -> Result<FeatureFlags> {
    let flags = emit_body(input, config, out)?;
    scaffold::emit(flags, config, out)?;
    Ok(flags)
}

/// Writes everything up to and including the input helper and returns the
/// flags collected on the way. Input is read once, front to back.
pub fn emit_body<R: Read, W: Write>(
    input: R,
    config: &Config,
    out: &mut W,
) -> Result<FeatureFlags> {
    emit_preamble(config, out)?;

    let cell = config.cell_width().c_type();
    let mut flags = FeatureFlags::default();
    let mut count = 0usize;

    for byte in BufReader::new(input).bytes() {
        match byte? {
            b'+' => writeln!(out, "  (*ptr)++;")?,
            b'-' => writeln!(out, "  (*ptr)--;")?,
            b'<' => writeln!(out, "  ptr--;")?,
            b'>' => writeln!(out, "  ptr++;")?,
            b',' => {
                writeln!(out, "  ch = getchar2();")?;
                match config.eof_policy() {
                    EofPolicy::ZeroOnEof => {
                        writeln!(out, "  if (ch == EOF) ch = 0;")?;
                        writeln!(out, "  *ptr = ({cell}) ch;")?;
                    }
                    EofPolicy::MinusOneOnEof => writeln!(out, "  *ptr = ({cell}) ch;")?,
                    EofPolicy::NoEffectOnEof => writeln!(out, "  if (ch != EOF) *ptr = ({cell}) ch;")?,
                }
                flags.saw_input = true;
            }
            b'.' => {
                writeln!(out, "  putchar(*ptr);")?;
                if config.force_flush() {
                    writeln!(out, "  fflush(stdout);")?;
                }
                flags.saw_output = true;
            }
            b'[' => writeln!(out, "  while (*ptr) {{")?,
            b']' => writeln!(out, "  }}")?,
            // Everything else is a comment
            _ => continue,
        }
        count += 1;
    }
    trace!("translated {} operators", count);

    emit_epilogue(out)?;
    emit_input_helper(out)?;

    debug!(
        "body done: input={} output={}",
        flags.saw_input, flags.saw_output
    );
    Ok(flags)
}

fn emit_preamble<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    writeln!(
        out,
        r#"#include <stdio.h>
#include <stdlib.h>
#include <stdint.h>
#include <string.h>
#include <getopt.h>
#include <unistd.h>
"#
    )?;

    if let Some(version) = config.version_text() {
        out.write_all(b"static char* VERSION = \"")?;
        write_escaped(out, version)?;
        writeln!(out, "\";")?;
    }
    if let Some(copyright) = config.copyright_text() {
        out.write_all(b"static char* COPYRIGHT = \"")?;
        write_escaped(out, copyright)?;
        writeln!(out, "\";")?;
    }

    let cell = config.cell_width().c_type();
    writeln!(
        out,
        r#"int getchar2(void);
int options(int argc, char** argv);

int main(int argc, char** argv) {{
  options(argc, argv);
  int ch;
  {cell}* buff = calloc({size}, sizeof *buff);
  if (buff == NULL) {{
    perror("calloc()");
    return 1;
  }}
  {cell}* ptr = buff;"#,
        size = config.array_size()
    )?;
    Ok(())
}

fn emit_epilogue<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        r#"  (void) ch;
  free(buff);
  return 0;
}}
"#
    )?;
    Ok(())
}

/// `getchar2` reads from stdin unless `--message` installed a string, in
/// which case it walks that string and then keeps returning EOF.
fn emit_input_helper<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        r#"static char* message = NULL;

int getchar2(void) {{
  if (message == NULL) {{
    return getchar();
  }} else if (*message == '\0') {{
    return EOF;
  }} else {{
    return (unsigned char) *(message++);
  }}
}}
"#
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CellWidth;

    fn body(source: &str, config: &Config) -> (String, FeatureFlags) {
        let mut out = Vec::new();
        let flags = emit_body(source.as_bytes(), config, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), flags)
    }

    /// The lines between the array setup and the epilogue.
    fn statements(text: &str) -> Vec<&str> {
        let start = text.find("* ptr = buff;\n").unwrap();
        let start = start + text[start..].find('\n').unwrap() + 1;
        let end = text.find("  (void) ch;").unwrap();
        text[start..end].lines().collect()
    }

    #[test]
    fn each_operator_emits_its_statement() {
        let (text, _) = body("+-<>[]", &Config::default());
        assert_eq!(
            statements(&text),
            vec!["  (*ptr)++;", "  (*ptr)--;", "  ptr--;", "  ptr++;", "  while (*ptr) {", "  }"]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let (text, flags) = body("hello world\n+ # ok", &Config::default());
        assert_eq!(statements(&text), vec!["  (*ptr)++;"]);
        assert_eq!(flags, FeatureFlags::default());
    }

    #[test]
    fn repeated_operators_are_not_folded() {
        let (text, _) = body("+++", &Config::default());
        assert_eq!(statements(&text), vec!["  (*ptr)++;"; 3]);
    }

    #[test]
    fn loop_emissions_match_bracket_counts_even_when_unbalanced() {
        for source in ["[[]", "]]][", "[[[", "]", "[-]>[<+>-]"] {
            let (text, _) = body(source, &Config::default());
            let lines = statements(&text);
            let opens = lines.iter().filter(|l| **l == "  while (*ptr) {").count();
            let closes = lines.iter().filter(|l| **l == "  }").count();
            assert_eq!(opens, source.matches('[').count(), "{source}");
            assert_eq!(closes, source.matches(']').count(), "{source}");
        }
    }

    #[test]
    fn input_sets_flag_and_follows_eof_policy() {
        let zero = Config::default().with_eof_policy(EofPolicy::ZeroOnEof);
        let (text, flags) = body(",", &zero);
        assert!(flags.saw_input);
        assert!(!flags.saw_output);
        assert_eq!(
            statements(&text),
            vec!["  ch = getchar2();", "  if (ch == EOF) ch = 0;", "  *ptr = (uint8_t) ch;"]
        );

        let (text, _) = body(",", &Config::default());
        assert_eq!(statements(&text), vec!["  ch = getchar2();", "  *ptr = (uint8_t) ch;"]);

        let no_effect = Config::default()
            .with_eof_policy(EofPolicy::NoEffectOnEof)
            .with_cell_width(CellWidth::Bits32);
        let (text, _) = body(",", &no_effect);
        assert_eq!(
            statements(&text),
            vec!["  ch = getchar2();", "  if (ch != EOF) *ptr = (uint32_t) ch;"]
        );
    }

    #[test]
    fn output_sets_flag_and_flushes_when_forced() {
        let (text, flags) = body(".", &Config::default());
        assert!(flags.saw_output);
        assert!(!flags.saw_input);
        assert_eq!(statements(&text), vec!["  putchar(*ptr);"]);

        let flush = Config::default().with_force_flush(true);
        let (text, _) = body(".", &flush);
        assert_eq!(statements(&text), vec!["  putchar(*ptr);", "  fflush(stdout);"]);
    }

    #[test]
    fn allocation_names_size_and_width_once() {
        let config = Config::new(1234).unwrap().with_cell_width(CellWidth::Bits16);
        let (text, _) = body("", &config);
        let alloc = text.lines().find(|l| l.contains("calloc(")).unwrap();
        assert_eq!(alloc, "  uint16_t* buff = calloc(1234, sizeof *buff);");
        assert_eq!(alloc.matches("1234").count(), 1);
        assert_eq!(alloc.matches("uint16_t").count(), 1);
        let allocations = text
            .lines()
            .filter(|l| l.contains("calloc(") && !l.contains("perror"))
            .count();
        assert_eq!(allocations, 1);
    }

    #[test]
    fn version_and_copyright_are_escaped() {
        let config = Config::default()
            .with_version_text(Some(b"v\"1\"".to_vec()))
            .with_copyright_text(Some(b"line1\nline2".to_vec()));
        let (text, _) = body("", &config);
        assert!(text.contains(r#"static char* VERSION = "v\"1\"";"#));
        assert!(text.contains(r#"static char* COPYRIGHT = "line1\nline2";"#));

        let (text, _) = body("", &Config::default());
        assert!(!text.contains("VERSION"));
        assert!(!text.contains("COPYRIGHT"));
    }

    #[test]
    fn layout_order_is_fixed() {
        let (text, _) = body("+", &Config::default());
        let includes = text.find("#include <stdio.h>").unwrap();
        let forward = text.find("int getchar2(void);").unwrap();
        let main = text.find("int main(").unwrap();
        let op = text.find("  (*ptr)++;").unwrap();
        let free = text.find("  free(buff);").unwrap();
        let helper = text.find("static char* message = NULL;").unwrap();
        assert!(includes < forward && forward < main && main < op);
        assert!(op < free && free < helper);
    }

    #[test]
    fn translate_appends_scaffold_after_body() {
        let mut out = Vec::new();
        let flags = translate("++.".as_bytes(), &Config::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(flags, FeatureFlags { saw_input: false, saw_output: true });
        let helper = text.find("int getchar2(void) {").unwrap();
        let longopts = text.find("struct option longopts[]").unwrap();
        assert!(helper < longopts);
        assert!(text.trim_end().ends_with('}'));
    }
}
