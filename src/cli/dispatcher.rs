use anyhow::{Result, anyhow};
use clap::CommandFactory;

use crate::{
    cli::{Cli, handlers},
    core::actions,
    state::AppContext,
};

/// Defines a system command, its aliases, and its handler.
/// Handlers return the exit code for the process.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &AppContext) -> Result<i32>,
}

/// Every command except the setup-script commands, which come from
/// `actions::SETUP_COMMANDS`.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "init",
        aliases: &[],
        handler: handlers::init::handle,
    },
    CommandDefinition {
        name: "uninit",
        aliases: &[],
        handler: handlers::uninit::handle,
    },
    CommandDefinition {
        name: "show",
        aliases: &[],
        handler: handlers::show::handle,
    },
    CommandDefinition {
        name: "exec",
        aliases: &[],
        handler: handlers::exec::handle,
    },
    CommandDefinition {
        name: "install",
        aliases: &[],
        handler: handlers::install::handle,
    },
    CommandDefinition {
        name: "info",
        aliases: &[],
        handler: handlers::info::handle,
    },
    CommandDefinition {
        name: "vacuum",
        aliases: &["gc"],
        handler: handlers::vacuum::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes `<command> [args...]` to its handler and returns the process exit code.
pub fn dispatch(all_args: Vec<String>, ctx: &AppContext) -> Result<i32> {
    log::debug!("Dispatching args: {:?}", all_args);

    let mut args = all_args.into_iter();
    let Some(name) = args.next() else {
        Cli::command().print_help()?;
        return Ok(2);
    };
    let rest: Vec<String> = args.collect();

    if let Some(command) = find_command(&name) {
        return (command.handler)(rest, ctx);
    }
    if let Some(setup) = actions::find_setup_command(&name) {
        return handlers::setup::handle(setup, rest, ctx);
    }

    Err(anyhow!(
        "Unknown command '{}'. Run 'pvt --help' to list the available commands.",
        name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_do_not_collide() {
        for setup in actions::SETUP_COMMANDS {
            assert!(find_command(setup.name).is_none(), "{} is shadowed", setup.name);
        }
        assert_eq!(find_command("gc").map(|c| c.name), Some("vacuum"));
        assert!(find_command("nope").is_none());
    }
}
