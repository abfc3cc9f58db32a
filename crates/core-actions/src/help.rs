//! Per-command help text shown by `help <command>` and the `?` suffix.

use crate::CommandKind;

pub fn usage(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Load => "load [path]",
        CommandKind::Save => "save [path]",
        CommandKind::Show => "show [query]",
        CommandKind::Count => "count [query]",
        CommandKind::Select => "select [query]",
        CommandKind::Unselect => "unselect",
        CommandKind::Revert => "revert",
        CommandKind::Replace => "replace <pattern> <replacement>",
        CommandKind::ReplaceInLines => "replace_in_lines <pattern> <replacement> <line-filter>",
        CommandKind::ReplaceConfirm => "replace_confirm <old> <new>",
        CommandKind::MultipleReplace => "multiple_replace <mapping-file> [tab|space|<char>]",
        CommandKind::Sort => "sort",
        CommandKind::Unique => "unique",
        CommandKind::RemoveEmptyLines => "remove_empty_lines",
        CommandKind::ReverseLines => "reverse_lines",
        CommandKind::TrimWhitespace => "trim_whitespace",
        CommandKind::ConvertCase => "convert_case <upper|lower|title>",
        CommandKind::SplitLines => "split_lines <delimiter>",
        CommandKind::MergeLines => "merge_lines [delimiter]",
        CommandKind::ExtractBetween => "extract_between <start-pattern> <end-pattern>",
        CommandKind::InsertLine => "insert_line <line-number> <text>",
        CommandKind::ExtractUrls => "extract_urls",
        CommandKind::ExtractEmails => "extract_emails",
        CommandKind::SelectFromFile => "select_from_file <list-file> [not]",
        CommandKind::Help => "help [command]",
        CommandKind::Exit => "exit",
    }
}

pub fn summary(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Load => "Load a file, or the clipboard when no path is given.",
        CommandKind::Save => "Write the buffer to a path, or back to the file it was loaded from.",
        CommandKind::Show => "Print lines matching the query (all lines without one).",
        CommandKind::Count => "Count lines matching the query.",
        CommandKind::Select => "Narrow the buffer to matching lines; `!query` keeps non-matching lines.",
        CommandKind::Unselect => "Merge edits made to the selection back into the full document.",
        CommandKind::Revert => "Undo the last change (one level).",
        CommandKind::Replace => "Regex replace in every line; falls back to literal text on error.",
        CommandKind::ReplaceInLines => "Like replace, but only in lines matching the filter.",
        CommandKind::ReplaceConfirm => "Replace literal text, asking for each occurrence.",
        CommandKind::MultipleReplace => "Apply literal replacements from a mapping file, in file order.",
        CommandKind::Sort => "Sort lines (case-sensitive, stable).",
        CommandKind::Unique => "Drop repeated lines, keeping the first occurrence.",
        CommandKind::RemoveEmptyLines => "Drop empty and whitespace-only lines.",
        CommandKind::ReverseLines => "Reverse line order.",
        CommandKind::TrimWhitespace => "Strip leading and trailing whitespace from each line.",
        CommandKind::ConvertCase => "Change letter case of every line.",
        CommandKind::SplitLines => "Split every line on a literal delimiter.",
        CommandKind::MergeLines => "Join all trimmed lines into one, separated by the delimiter.",
        CommandKind::ExtractBetween => "Keep the first span from a start-matching line to the next end-matching line.",
        CommandKind::InsertLine => "Insert a line before the given 1-based position.",
        CommandKind::ExtractUrls => "Replace the buffer with every URL found, one per line.",
        CommandKind::ExtractEmails => "Replace the buffer with every email address found, one per line.",
        CommandKind::SelectFromFile => "Keep (or with `not`, drop) lines containing any entry of a list file.",
        CommandKind::Help => "List commands, or describe one.",
        CommandKind::Exit => "Leave the shell.",
    }
}

const QUERY_NOTES: &str = "\
Query syntax:
  a OR b         match either alternative
  !query         invert (select only)
  [tab] [spaces] [quote] [doublequote] [pipe]
                 placeholders for characters that are awkward to quote";

/// Full help for one command.
pub fn command_help(kind: CommandKind) -> String {
    let mut out = format!("{}\n  {}\n", usage(kind), summary(kind));
    match kind {
        CommandKind::Show | CommandKind::Count | CommandKind::Select => {
            out.push('\n');
            out.push_str(QUERY_NOTES);
            out.push('\n');
        }
        CommandKind::Replace | CommandKind::ReplaceInLines => out.push_str(
            "\n  Replacement: \\1..\\99 or $1 insert groups, \\0 inserts the whole match.\n",
        ),
        CommandKind::ReplaceConfirm => {
            out.push_str("\n  Answers: y = replace, n = skip, a = replace all, q = quit.\n")
        }
        _ => {}
    }
    out
}

/// Overview listing every command.
pub fn overview() -> String {
    let width = CommandKind::ALL
        .iter()
        .map(|k| k.name().len())
        .max()
        .unwrap_or(0);
    let mut out = String::from("Commands (append `?` for details, `>` to copy output):\n");
    for kind in CommandKind::ALL {
        out.push_str(&format!("  {:<width$}  {}\n", kind.name(), summary(kind)));
    }
    out
}
