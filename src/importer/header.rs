// ==========================================
// 登记系统 - 表头解析
// ==========================================
// 规则:
// - 字段未声明表头键: 驼峰拆词 → 单空格连接 → 首字母大写
// - 字段声明了表头键: 查消息目录，缺失译文时按字面使用键本身
// ==========================================

use crate::i18n::{localize_or_literal, MessageCatalog};
use crate::importer::metadata::FieldDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Space,
    Other,
}

fn classify(c: char) -> CharClass {
    if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_lowercase() {
        CharClass::Lower
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Other
    }
}

/// 按字符类型拆分驼峰字符串
///
/// 大写后接小写时，最后一个大写字母归入后一个词:
/// "hasActor" → ["has", "Actor"], "HTMLParser" → ["HTML", "Parser"]
pub fn split_camel_case(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut token_start = 0;
    let mut current = classify(chars[0]);

    for pos in 1..chars.len() {
        let class = classify(chars[pos]);
        if class == current {
            continue;
        }
        if class == CharClass::Lower && current == CharClass::Upper {
            let new_start = pos - 1;
            if new_start != token_start {
                tokens.push(chars[token_start..new_start].iter().collect());
                token_start = new_start;
            }
        } else {
            tokens.push(chars[token_start..pos].iter().collect());
            token_start = pos;
        }
        current = class;
    }
    tokens.push(chars[token_start..].iter().collect());

    tokens
}

/// 驼峰字符串 → 可读文本（"taskCategory" → "Task Category"）
pub fn parse_camel_case(input: &str) -> String {
    let joined = split_camel_case(input).join(" ");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 解析字段在指定语言下的期望表头
pub fn resolve_header(field: &FieldDescriptor, locale: &str, catalog: &dyn MessageCatalog) -> String {
    match field.header_key {
        Some(key) if !key.is_empty() => localize_or_literal(catalog, key, locale),
        _ => parse_camel_case(field.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::StaticCatalog;

    fn field(name: &'static str, header_key: Option<&'static str>) -> FieldDescriptor {
        FieldDescriptor {
            name,
            local_position: 0,
            declared_on_shared_base: false,
            header_key,
            mandatory: false,
            updatable: false,
            cross_reference_position: None,
        }
    }

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("hasActor"), vec!["has", "Actor"]);
        assert_eq!(split_camel_case("TaskCategory"), vec!["Task", "Category"]);
        assert_eq!(split_camel_case("HTMLParser"), vec!["HTML", "Parser"]);
        assert_eq!(split_camel_case("year2024Total"), vec!["year", "2024", "Total"]);
        assert!(split_camel_case("").is_empty());
    }

    #[test]
    fn test_parse_camel_case() {
        assert_eq!(parse_camel_case("createdBy"), "Created By");
        assert_eq!(parse_camel_case("TaskCategory"), "Task Category");
        assert_eq!(parse_camel_case("name"), "Name");
        assert_eq!(parse_camel_case("åsikt"), "Åsikt");
        assert_eq!(parse_camel_case(""), "");
    }

    #[test]
    fn test_header_derived_from_name_without_key() {
        let catalog = StaticCatalog::new();
        assert_eq!(resolve_header(&field("hasActor", None), "en", &catalog), "Has Actor");
        assert_eq!(resolve_header(&field("name", Some("")), "en", &catalog), "Name");
    }

    #[test]
    fn test_header_key_translated() {
        let catalog = StaticCatalog::new().with("sv", "Has actor", "Har aktör");
        assert_eq!(
            resolve_header(&field("hasActor", Some("Has actor")), "sv", &catalog),
            "Har aktör"
        );
    }

    #[test]
    fn test_header_key_literal_fallback_is_never_empty() {
        let catalog = StaticCatalog::new();
        for key in ["Has actor", "x", "task.category.name"] {
            let header = resolve_header(&field("hasActor", Some(key)), "sv", &catalog);
            assert_eq!(header, key);
            assert!(!header.is_empty());
        }
    }
}
