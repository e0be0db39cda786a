//! vCard 3.0 出力
//!
//! 出力する行と順序は固定。空のフィールドは行ごと省略する（空行は書かない）。

use crate::types::ResolvedContact;

const VERSION: &str = "3.0";

fn non_empty(note: Option<&str>) -> Option<&str> {
    note.filter(|n| !n.is_empty())
}

/// 1件分のvCardを組み立てる
struct CardBuilder {
    out: String,
}

impl CardBuilder {
    fn new() -> Self {
        Self { out: String::with_capacity(256) }
    }

    fn line(&mut self, name: &str, value: &str) -> &mut Self {
        self.out.push_str(name);
        self.out.push(':');
        self.out.push_str(value);
        self.out.push('\n');
        self
    }

    fn optional(&mut self, name: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.line(name, value);
        }
        self
    }

    fn finish(mut self) -> String {
        self.line("END", "VCARD");
        self.out.push('\n');
        self.out
    }
}

/// アドレス帳名のヘッダー（共通メモがなければ空文字）
pub fn emit_header(shared_note: Option<&str>) -> String {
    match non_empty(shared_note) {
        Some(note) => format!("X-ADDRESSBOOK-NAME:{}\n\n", note),
        None => String::new(),
    }
}

/// 連絡先1件をvCardブロックに変換
///
/// 電話番号は正規化済みであること。ブロックの後ろには空行が付く。
pub fn emit_card(contact: &ResolvedContact, shared_note: Option<&str>) -> String {
    let mut card = CardBuilder::new();

    card.line("BEGIN", "VCARD")
        .line("VERSION", VERSION)
        .line("N", &format!("{};{};;;", contact.family_name, contact.given_name))
        .line("FN", &contact.display_name())
        .optional("TITLE", &contact.role)
        .optional("RELATED;type=agent", &contact.agent)
        .optional("RELATED;type=relation", &contact.relation)
        .optional("CATEGORIES", &contact.keywords)
        .optional("TEL;TYPE=CELL", &contact.phone)
        .optional("EMAIL;TYPE=INTERNET", &contact.email);

    if !contact.address.is_empty() {
        card.line("ADR;TYPE=HOME", &format!(";;{};;;;", contact.address));
    }
    if let Some(note) = non_empty(shared_note) {
        card.line("NOTE", note);
    }

    card.finish()
}
