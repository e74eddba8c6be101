//! Contains functions related to displaying help

#[allow(clippy::wildcard_imports)] // Everything in snippets is a Verbosely named const
use crate::{print_arrowed, print_sidebarred, snippets::*};

pub fn help(lc_input: &str) {
    let mut help_strs = lc_input.split_whitespace();
    help_strs.next();
    if let Some(topic) = help_strs.next() {
        match Topic::from(topic) {
            // All the .help files have a trailing newline, so this is print! instead of println!
            Topic::Operators => flanked_example("Operators", EXAMPLE_OPERATORS),
            Topic::Precedence => flanked_example("Precedence & Grouping", EXAMPLE_PRECEDENCE),
            Topic::Errors => flanked_example("Errors", EXAMPLE_ERRORS),
            Topic::Topics => print!("{HELP_TOPICS}"),
            Topic::Unknown(topic) => {
                print_sidebarred(&format!("Unknown help topic: {topic}"));
                print_sidebarred("Type: 'help topics' for a list of valid topics");
            }
        }
    } else {
        print!("{HELP_GENERAL}");
    }
}

enum Topic<'a> {
    Operators,
    Precedence,
    Errors,
    Topics,
    Unknown(&'a str),
}

impl<'a> From<&'a str> for Topic<'a> {
    fn from(value: &'a str) -> Self {
        match value {
            "operator" | "operators" => Topic::Operators,
            "precedence" | "grouping" | "parentheses" => Topic::Precedence,
            "error" | "errors" => Topic::Errors,
            "topics" => Topic::Topics,
            other => Self::Unknown(other),
        }
    }
}

fn flanked_example(name: &str, example: &str) {
    print_arrowed(name);
    println!();
    println!("{example}");
    print_arrowed("End of Example");
}
