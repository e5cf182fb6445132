use clap::Parser;

pub mod dispatcher;
pub mod handlers;

/// Builds the color-aware help string at runtime.
fn build_help_string() -> &'static str {
    // Renders the semantic tags of the help template (`<title>`, `<cmd>`, ...)
    // into ANSI styles, or strips them when colors are off.

    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let err = if use_colors { "\x1b[91m" } else { "" }; // Bright Red (destructive)
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<err>", err)
        .replace("</err>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// Locates the project you are in and manages its isolated Python environment.
#[derive(Parser, Debug)]
#[command(
    name = "pvt",
    author,
    version,
    about,
    help_template = { build_help_string() },
)]
// Subcommands parse their own flags; see `dispatcher`.
#[command(disable_help_subcommand = true)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// The command followed by its arguments.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}
