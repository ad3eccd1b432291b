//! 启动: 输出菜单, 解析用户选择

use std::io::{self, BufRead, Write};
use crate::stat::ResourceKind;

/// 需要监控的资源, 启动后不再改变
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub cpu: bool,
    pub memory: bool,
    pub disk: bool,
}

impl Selection {
    /// 只看输入中第一个以空白分隔的部分, 例如 `13`
    ///
    /// 返回无法识别的字符
    pub fn parse(input: &str) -> (Selection, Vec<char>) {
        let mut selection = Selection::default();
        let mut rejected = Vec::new();

        let token = input.split_whitespace().next().unwrap_or_default();
        for choice in token.chars() {
            match ResourceKind::from_choice(choice) {
                Some(ResourceKind::Cpu) => selection.cpu = true,
                Some(ResourceKind::Memory) => selection.memory = true,
                Some(ResourceKind::Disk) => selection.disk = true,
                None => rejected.push(choice),
            }
        }

        (selection, rejected)
    }

    pub fn contains(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Cpu => self.cpu,
            ResourceKind::Memory => self.memory,
            ResourceKind::Disk => self.disk,
        }
    }

    /// 按 CPU、内存、磁盘的顺序
    pub fn kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        ResourceKind::ALL.into_iter().filter(|kind| self.contains(*kind))
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().next().is_none()
    }
}

/// 输出菜单
pub fn print_menu(writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "[System Resource Monitor]")?;
    writeln!(writer)?;
    writeln!(writer, "Select the system resources to monitor:")?;
    for (choice, kind) in ('1'..='3').zip(ResourceKind::ALL) {
        writeln!(writer, "{choice}. {kind} usage")?;
    }
    write!(writer, "Choice (e.g. 123): ")?;
    writer.flush()
}

/// 读取一行输入, 没有输入时返回空字符串
pub fn read_choice(reader: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}

/// 逐个输出无法识别的字符
pub fn report_rejected(writer: &mut impl Write, rejected: &[char]) -> io::Result<()> {
    for choice in rejected {
        writeln!(writer, "Invalid selection: {choice}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_order() {
        let (selection, rejected) = Selection::parse("31\n");
        assert_eq!(selection, Selection { cpu: true, memory: false, disk: true });
        assert!(rejected.is_empty());

        let kinds = selection.kinds().collect::<Vec<_>>();
        assert_eq!(kinds, vec![ResourceKind::Cpu, ResourceKind::Disk]);
    }

    #[test]
    fn repeated_choice_is_idempotent() {
        assert_eq!(Selection::parse("111").0, Selection::parse("1").0);
    }

    #[test]
    fn all() {
        let (selection, _) = Selection::parse("123");
        assert_eq!(selection.kinds().collect::<Vec<_>>(), ResourceKind::ALL.to_vec());
    }

    #[test]
    fn unrecognized_characters_are_reported() {
        let (selection, rejected) = Selection::parse("1x9");
        assert_eq!(selection, Selection { cpu: true, ..Default::default() });
        assert_eq!(rejected, vec!['x', '9']);
    }

    #[test]
    fn nothing_selected() {
        let (selection, rejected) = Selection::parse("9");
        assert!(selection.is_empty());
        assert_eq!(rejected, vec!['9']);

        let (selection, rejected) = Selection::parse("");
        assert!(selection.is_empty());
        assert!(rejected.is_empty());
    }

    #[test]
    fn only_first_word() {
        let (selection, rejected) = Selection::parse("  2 3");
        assert_eq!(selection, Selection { memory: true, ..Default::default() });
        assert!(rejected.is_empty());
    }

    #[test]
    fn menu_lists_choices() {
        let mut out = Vec::new();
        print_menu(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("1. CPU usage"));
        assert!(out.contains("2. Memory usage"));
        assert!(out.contains("3. Disk usage"));
        assert!(out.ends_with("Choice (e.g. 123): "));
    }

    #[test]
    fn rejected_lines() {
        let mut out = Vec::new();
        report_rejected(&mut out, &['x', '7']).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Invalid selection: x\nInvalid selection: 7\n");
    }

    #[test]
    fn reads_one_line() {
        let mut input = io::Cursor::new("13\n2\n");
        assert_eq!(read_choice(&mut input).unwrap(), "13\n");
    }
}
