//! Line-level bdnet grammar.

use combine::parser::char::{char as cmb_char, spaces, string};
use combine::parser::range::{recognize, take_while, take_while1};
use combine::{attempt, Parser};

/// A `<name> : <value>` entry of an INPUT, OUTPUT or INSTANCE block.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    pub name: &'a str,
    /// Raw value, including a trailing `;` if there was one.
    pub value: &'a str,
}

impl<'a> Record<'a> {
    /// `;` marks the last entry of an INPUT or OUTPUT block.
    pub fn is_last(&self) -> bool {
        self.value.ends_with(';')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Model,
    EndModel,
    Input,
    Output,
    Instance,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Model => "MODEL",
            Keyword::EndModel => "ENDMODEL",
            Keyword::Input => "INPUT",
            Keyword::Output => "OUTPUT",
            Keyword::Instance => "INSTANCE",
        }
    }
}

fn record_parser<'a>() -> impl Parser<Input = &'a str, Output = Record<'a>> {
    // a quoted name may contain `:`
    let quoted = recognize((cmb_char('"'), take_while(|c: char| c != '"'), cmb_char('"')));
    let bare = take_while1(|c: char| !c.is_whitespace() && c != ':');
    let name = attempt(quoted).or(bare);
    let value = take_while1(|c: char| !c.is_whitespace());

    (spaces(), name, spaces(), cmb_char(':'), spaces(), value)
        .map(|(_, name, _, _, _, value)| Record { name, value })
}

/// Parses a record line. Anything after the value is ignored.
pub fn parse_record(line: &str) -> Option<Record> {
    record_parser().parse(line).ok().map(|(rec, _)| rec)
}

/// The token following `keyword` at the start of `line`, e.g. the module name
/// of `MODEL "top";`.
pub fn keyword_arg(keyword: Keyword, line: &str) -> Option<&str> {
    let arg = (
        spaces(),
        string(keyword.as_str()),
        spaces(),
        take_while1(|c: char| !c.is_whitespace()),
    )
        .map(|(_, _, _, arg)| arg)
        .parse(line);
    arg.ok().map(|(arg, _)| arg)
}

/// Decides which record a line opens.
///
/// At most one keyword is reported. A line starting with `MODEL` or
/// `INSTANCE` and a name is a header, so a name such as `INPUT_PAD` never
/// opens a port list. Otherwise keywords are found anywhere in the line,
/// tried in the order ENDMODEL, INPUT, OUTPUT, INSTANCE.
pub fn classify(line: &str) -> Option<Keyword> {
    if line.contains(Keyword::Model.as_str()) {
        if keyword_arg(Keyword::Model, line).is_some() {
            return Some(Keyword::Model);
        }
        if line.contains(Keyword::EndModel.as_str()) {
            return Some(Keyword::EndModel);
        }
    }
    if keyword_arg(Keyword::Instance, line).is_some() {
        return Some(Keyword::Instance);
    }

    [Keyword::Input, Keyword::Output, Keyword::Instance]
        .iter()
        .cloned()
        .find(|kw| line.contains(kw.as_str()))
}
