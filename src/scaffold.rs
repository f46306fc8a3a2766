//! Command line of the generated program.
//!
//! Emitted after the body, once the translator knows whether the source
//! reads input and/or writes output. `--file`/`--message` only exist when the
//! program reads, `--output` only when it writes.

use std::io::Write;

use log::debug;

use crate::config::{Config, DefaultParam};
use crate::error::Result;
use crate::translator::FeatureFlags;

impl DefaultParam {
    /// Drops a binding for an operator class the program never uses. A
    /// program that only writes always takes its output file positionally.
    pub fn resolve(self, flags: FeatureFlags) -> DefaultParam {
        let mut param = self;
        if !flags.saw_input && matches!(param, DefaultParam::Input | DefaultParam::Message) {
            param = DefaultParam::None;
        }
        if !flags.saw_output && param == DefaultParam::Output {
            param = DefaultParam::None;
        }
        if !flags.saw_input && flags.saw_output {
            param = DefaultParam::Output;
        }
        param
    }

    fn usage_placeholder(self) -> Option<&'static str> {
        match self {
            DefaultParam::None => None,
            DefaultParam::Output => Some("<output-file>"),
            DefaultParam::Input => Some("<input-file>"),
            DefaultParam::Message => Some("<input-message>"),
        }
    }
}

/// Appends the option table, `options()` and the redirection code.
pub fn emit<W: Write>(flags: FeatureFlags, config: &Config, out: &mut W) -> Result<DefaultParam> {
    let param = config.default_param().resolve(flags);
    if param != config.default_param() {
        debug!(
            "default parameter {:?} resolved to {:?}",
            config.default_param(),
            param
        );
    }

    emit_option_table(flags, out)?;
    emit_parse_loop(flags, out)?;
    emit_positional(param, out)?;
    emit_usage(flags, param, config, out)?;
    emit_redirects(flags, out)?;
    writeln!(out, "  return optind;")?;
    writeln!(out, "}}")?;
    Ok(param)
}

fn emit_option_table<W: Write>(flags: FeatureFlags, out: &mut W) -> Result<()> {
    writeln!(
        out,
        r#"struct option longopts[] = {{
  {{ "help", no_argument, NULL, 'h' }},
  {{ "version", no_argument, NULL, 'v' }},"#
    )?;
    if flags.saw_input {
        writeln!(
            out,
            r#"  {{ "file", required_argument, NULL, 'f' }},
  {{ "message", required_argument, NULL, 'm' }},"#
        )?;
    }
    if flags.saw_output {
        writeln!(out, r#"  {{ "output", required_argument, NULL, 'o' }},"#)?;
    }
    writeln!(
        out,
        r#"  {{ NULL, 0, NULL, '\0' }},
}};
"#
    )?;
    Ok(())
}

fn emit_parse_loop<W: Write>(flags: FeatureFlags, out: &mut W) -> Result<()> {
    writeln!(out, "int options(int argc, char** argv) {{")?;
    if flags.saw_input {
        writeln!(out, "  char* input_path = NULL;")?;
    }
    if flags.saw_output {
        writeln!(out, "  char* output_path = NULL;")?;
    }
    writeln!(out, "  int opt, longindex, show_help = 0;")?;

    write!(out, r#"  while ((opt = getopt_long(argc, argv, "hv""#)?;
    if flags.saw_input {
        write!(out, r#" "f:m:""#)?;
    }
    if flags.saw_output {
        write!(out, r#" "o:""#)?;
    }
    writeln!(out, ", longopts, &longindex)) != -1) {{")?;

    writeln!(
        out,
        r#"    switch (opt) {{
    case 'h':
    case 'v': show_help |= 1; break;"#
    )?;
    if flags.saw_input {
        writeln!(
            out,
            r#"    case 'f': input_path = optarg; message = NULL; break;
    case 'm': input_path = NULL; message = optarg; break;"#
        )?;
    }
    if flags.saw_output {
        writeln!(out, "    case 'o': output_path = optarg; break;")?;
    }
    writeln!(
        out,
        r#"    default: show_help = 2; break;
    }}
  }}"#
    )?;
    Ok(())
}

fn emit_positional<W: Write>(param: DefaultParam, out: &mut W) -> Result<()> {
    match param {
        DefaultParam::None => {}
        DefaultParam::Output => writeln!(
            out,
            r#"  if (optind < argc) {{
    output_path = argv[optind++];
  }}"#
        )?,
        DefaultParam::Input => writeln!(
            out,
            r#"  if (optind < argc) {{
    input_path = argv[optind++];
    message = NULL;
  }}"#
        )?,
        DefaultParam::Message => writeln!(
            out,
            r#"  if (optind < argc) {{
    input_path = NULL;
    message = argv[optind++];
  }}"#
        )?,
    }
    writeln!(
        out,
        r#"  if (optind < argc) {{
    show_help = 2;
  }}"#
    )?;
    Ok(())
}

fn emit_usage<W: Write>(
    flags: FeatureFlags,
    param: DefaultParam,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "  if (show_help) {{")?;
    if config.version_text().is_some() {
        writeln!(out, "    puts(VERSION);")?;
    }
    if config.copyright_text().is_some() {
        writeln!(out, "    puts(COPYRIGHT);")?;
    }

    write!(out, r#"    printf("Usage:\n  %s [options]""#)?;
    if let Some(placeholder) = param.usage_placeholder() {
        write!(out, r#"" [ {placeholder} ]""#)?;
    }
    writeln!(out, r#""\n", argv[0]);"#)?;
    writeln!(out, r#"    puts("Options:");"#)?;

    if flags.saw_input {
        writeln!(
            out,
            r#"    puts("  -f, --file <file>   : input file path.");
    puts("  -m, --message <str> : input message.");"#
        )?;
    }
    if flags.saw_output {
        writeln!(out, r#"    puts("  -o, --output <file> : output file path.");"#)?;
    }
    writeln!(
        out,
        r#"    puts("  -v, --version       : display version information.");
    puts("  -h, --help          : display help message.");
    exit(show_help == 1 ? 0 : 1);
  }}"#
    )?;
    Ok(())
}

/// A path of `-` keeps the standard stream.
fn emit_redirects<W: Write>(flags: FeatureFlags, out: &mut W) -> Result<()> {
    if flags.saw_input {
        writeln!(
            out,
            r#"  if (input_path != NULL && strcmp(input_path, "-") != 0) {{
    FILE* in = fopen(input_path, "r");
    if (in == NULL) {{
      perror(input_path);
      exit(1);
    }}
    if (dup2(fileno(in), 0) == -1) {{
      perror("dup2(in)");
      exit(1);
    }}
  }}"#
        )?;
    }
    if flags.saw_output {
        writeln!(
            out,
            r#"  if (output_path != NULL && strcmp(output_path, "-") != 0) {{
    FILE* out = fopen(output_path, "w");
    if (out == NULL) {{
      perror(output_path);
      exit(1);
    }}
    if (dup2(fileno(out), 1) == -1) {{
      perror("dup2(out)");
      exit(1);
    }}
  }}"#
        )?;
    }
    Ok(())
}
