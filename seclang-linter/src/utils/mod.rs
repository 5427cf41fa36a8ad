use crate::command::Command;
use crate::commands;

pub mod reader;
pub mod writer;

pub fn get_linter_commands() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(commands::run::Run::new()),
        Box::new(commands::parse_tree::ParseTree::new()),
    ]
}
