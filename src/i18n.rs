// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持瑞典语与英语（回退: en）
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use std::collections::HashMap;

// ==========================================
// MessageCatalog Trait
// ==========================================
// 用途: 键 + 语言 → 译文；找不到时返回 None（不是错误）
// 实现者: RustI18nCatalog, StaticCatalog
pub trait MessageCatalog: Send + Sync {
    fn translate(&self, key: &str, locale: &str) -> Option<String>;
}

impl<T: MessageCatalog + ?Sized> MessageCatalog for &T {
    fn translate(&self, key: &str, locale: &str) -> Option<String> {
        (**self).translate(key, locale)
    }
}

impl<T: MessageCatalog + ?Sized> MessageCatalog for std::sync::Arc<T> {
    fn translate(&self, key: &str, locale: &str) -> Option<String> {
        (**self).translate(key, locale)
    }
}

// ==========================================
// RustI18nCatalog - 内嵌 locales/*.yml 的目录
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RustI18nCatalog;

impl MessageCatalog for RustI18nCatalog {
    fn translate(&self, key: &str, locale: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }

        // rust-i18n 在找不到译文时返回键本身（或 "locale.key"）
        let text = rust_i18n::t!(key, locale = locale);
        let unresolved = format!("{}.{}", locale, key);
        if text.as_ref() == key || text.as_ref() == unresolved {
            None
        } else {
            Some(text.into_owned())
        }
    }
}

// ==========================================
// StaticCatalog - 内存目录
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<(String, String), String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加译文
    pub fn with(mut self, locale: &str, key: &str, text: &str) -> Self {
        self.insert(locale, key, text);
        self
    }

    pub fn insert(&mut self, locale: &str, key: &str, text: &str) {
        self.entries
            .insert((locale.to_string(), key.to_string()), text.to_string());
    }
}

impl MessageCatalog for StaticCatalog {
    fn translate(&self, key: &str, locale: &str) -> Option<String> {
        self.entries
            .get(&(locale.to_string(), key.to_string()))
            .cloned()
    }
}

// ==========================================
// 诊断消息模板
// ==========================================

/// 消息模板: 目录键 + 内置英文模板（目录缺失时使用）
#[derive(Debug, Clone, Copy)]
pub struct MessageTemplate {
    pub key: &'static str,
    pub default: &'static str,
}

pub const MISSING_SHEET: MessageTemplate = MessageTemplate {
    key: "import.validation.missing_sheet",
    default: "Missing sheet with name %{name}",
};

pub const COLUMN_MISMATCH: MessageTemplate = MessageTemplate {
    key: "import.validation.column_mismatch",
    default: "Expected column header %{position} to be '%{header}'",
};

pub const ENTRY_DOES_NOT_EXIST: MessageTemplate = MessageTemplate {
    key: "import.validation.entry_does_not_exist",
    default: "Entry on row %{row} does not exist",
};

pub const CELL_TYPE_MISMATCH: MessageTemplate = MessageTemplate {
    key: "import.validation.cell_type_mismatch",
    default: "Unexpected cell type in column %{position} on row %{row}",
};

pub const MANDATORY_MISSING: MessageTemplate = MessageTemplate {
    key: "import.validation.mandatory_missing",
    default: "Mandatory column '%{header}' is empty on row %{row}",
};

/// 翻译键，缺失时按字面返回键本身
pub fn localize_or_literal(catalog: &dyn MessageCatalog, key: &str, locale: &str) -> String {
    catalog
        .translate(key, locale)
        .unwrap_or_else(|| key.to_string())
}

/// 替换 %{name} 形式的占位符
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 生成本地化诊断消息
///
/// # 示例
/// ```no_run
/// use register_impex::i18n::{message, RustI18nCatalog, MISSING_SHEET};
/// let msg = message(&RustI18nCatalog, "en", MISSING_SHEET, &[("name", "Task categories")]);
/// ```
pub fn message(
    catalog: &dyn MessageCatalog,
    locale: &str,
    template: MessageTemplate,
    args: &[(&str, &str)],
) -> String {
    let text = catalog
        .translate(template.key, locale)
        .unwrap_or_else(|| template.default.to_string());
    interpolate(&text, args)
}
