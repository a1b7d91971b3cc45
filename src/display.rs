//! 表示ペイン用の行番号付きレンダリング

/// ファイル内容を表示行に変換
///
/// 内容全体の前後の空白を除いてから行に分け、空行を捨て、残りに1始まりの連番を振る。
/// 空行は番号の欠番にならない。
///
/// # Examples
/// ```
/// use crudpad::display::numbered_lines;
///
/// assert_eq!(numbered_lines("x\n\ny"), vec!["1. x", "2. y"]);
/// ```
pub fn numbered_lines(content: &str) -> Vec<String> {
    content
        .trim()
        .lines()
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| format!("{}. {}", index + 1, line))
        .collect()
}
