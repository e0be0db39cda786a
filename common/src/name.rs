//! 氏名の分割と整形
//!
//! 「名 姓」形式の文字列を名と姓に分け、姓の大文字表記を整える。
//!
//! 分割はヒューリスティック。"de la TOUR" のように小文字の前置詞で始まる姓は
//! 3語以上だと名の一部と判定されるため、結合列では "Marie de la TOUR" が
//! ("Marie de", "La Tour") になる。既知の制約として扱う。

/// 大文字の文字を1つ以上含み、小文字を含まない（数字や記号は問わない）
fn is_all_caps_word(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 氏名を単語ごとに先頭大文字へ整形
///
/// `preserve_all_caps`がtrueで、入力がすでに全て大文字ならそのまま返す。
/// 連続する空白は1つにまとまる。
///
/// # Examples
/// ```
/// use csv2vcf_common::format_name;
///
/// assert_eq!(format_name("DE LA TOUR", false), "De La Tour");
/// assert_eq!(format_name("DUPONT", true), "DUPONT");
/// ```
pub fn format_name(name: &str, preserve_all_caps: bool) -> String {
    if name.is_empty() {
        return String::new();
    }

    if preserve_all_caps && name.to_uppercase() == name {
        return name.to_string();
    }

    name.to_lowercase()
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// 「名 姓」の文字列を (名, 姓) に分割
///
/// 1. 空文字 → ("", "")
/// 2. 1語 → (語, "")
/// 3. 1語目にハイフンがあれば1語目だけが名（"Jean-Pierre MARTIN"）
/// 4. 3語以上で2語目が全大文字でなく2文字以上なら、2語目までが名（"Marie France de la TOUR"）
/// 5. それ以外は1語目だけが名
///
/// 姓は[`format_name`]で整形される。名はそのまま。
pub fn split_full_name(full_name: &str) -> (String, String) {
    let words: Vec<&str> = full_name.split_whitespace().collect();

    match words.len() {
        0 => return (String::new(), String::new()),
        1 => return (words[0].to_string(), String::new()),
        _ => {}
    }

    let split_at = if words[0].contains('-') {
        1
    } else if words.len() >= 3 && !is_all_caps_word(words[1]) && words[1].chars().count() > 1 {
        2
    } else {
        1
    };

    let given = words[..split_at].join(" ");
    let family = format_name(&words[split_at..].join(" "), false);

    (given, family)
}
