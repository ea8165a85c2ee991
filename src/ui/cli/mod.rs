pub mod cli_commands;
pub mod output;
