//! Terminal presenter
//!
//! Numbered category list, then a numbered program list. Empty input, `q` or
//! EOF cancels; `0` in the program list goes back to the categories.

use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Stderr, StdinLock, Write};

use crate::core::model::MenuTree;
use crate::ui::Presenter;

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Pick(usize),
    Back,
    Cancel,
    Invalid,
}

pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
}

impl TerminalPresenter<StdinLock<'static>, Stderr> {
    /// Read from stdin, prompt on stderr so stdout stays clean
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_choice(&mut self, len: usize, allow_back: bool) -> Result<Choice> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Choice::Cancel);
        }

        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("q") {
            return Ok(Choice::Cancel);
        }
        if allow_back && line == "0" {
            return Ok(Choice::Back);
        }

        Ok(match line.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Choice::Pick(n - 1),
            _ => Choice::Invalid,
        })
    }

    fn list<'a>(&mut self, title: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
        writeln!(self.output, "{}", title.bold())?;
        for (i, name) in names.enumerate() {
            writeln!(self.output, "  {} {}", format!("{:>2})", i + 1).cyan(), name)?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn present(&mut self, tree: &MenuTree) -> Result<Option<String>> {
        if tree.is_empty() {
            writeln!(self.output, "No applications found.")?;
            return Ok(None);
        }

        loop {
            self.list(
                "Categories",
                tree.categories.iter().map(|c| c.name.as_str()),
            )?;
            self.prompt("Category (empty to cancel): ")?;

            let category = match self.read_choice(tree.categories.len(), false)? {
                Choice::Pick(i) => &tree.categories[i],
                Choice::Cancel => return Ok(None),
                Choice::Back | Choice::Invalid => {
                    writeln!(self.output, "{}", "Invalid choice.".yellow())?;
                    continue;
                }
            };

            if category.entries.is_empty() {
                writeln!(self.output, "No programs in {}.", category.name)?;
                continue;
            }

            loop {
                self.list(
                    &category.name,
                    category.entries.iter().map(|e| e.name.as_str()),
                )?;
                self.prompt("Program (0 to go back, empty to cancel): ")?;

                match self.read_choice(category.entries.len(), true)? {
                    Choice::Pick(i) => return Ok(Some(category.entries[i].command.clone())),
                    Choice::Cancel => return Ok(None),
                    Choice::Back => break,
                    Choice::Invalid => {
                        writeln!(self.output, "{}", "Invalid choice.".yellow())?;
                    }
                }
            }
        }
    }
}
