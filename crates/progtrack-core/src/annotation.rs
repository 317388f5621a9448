//! `@progress` 标注的匹配与归一化
use anyhow::Result;
use regex::Regex;

/// 标注格式：`@progress <value>[:] ["note"|'note']`，大小写不敏感。
/// 小数分支必须排在整数分支之前，否则 `0.5` 会只匹配到 `0`；两者都允许 `%` 后缀。
const ANNOTATION_PATTERN: &str =
    r#"(?i)@progress\s+(?P<value>\d*\.\d+%?|\d+%?|done)\s*:?\s*(?P<note>"[^"]*"|'[^']*')?"#;

/// 单个标注的原始捕获
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub value: String,
    pub note: Option<String>,
}

/// 标注匹配器（扫描期间只编译一次）
pub struct AnnotationMatcher {
    pattern: Regex,
}

impl AnnotationMatcher {
    pub fn new() -> Result<Self> {
        Ok(Self { pattern: Regex::new(ANNOTATION_PATTERN)? })
    }

    /// 返回文本中的全部标注，按出现顺序
    pub fn find_all(&self, text: &str) -> Vec<Annotation> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let value = caps.name("value")?.as_str().to_string();
                let note = caps.name("note").map(|m| m.as_str().to_string());
                Some(Annotation { value, note })
            })
            .collect()
    }
}

/// 归一化进度值：`done` → 1.0；`NN%` → NN/100；其余按浮点解析。
/// 非 ASCII 的十进制数字（如 `٥٠`）先换算为 ASCII 再解析。
/// 解析失败时返回 `None`，由调用方记为“无进度”。
pub fn normalize_progress(raw: &str) -> Option<f64> {
    let mut value = raw.trim().to_lowercase();
    if value == "done" {
        return Some(1.0);
    }
    if !value.is_ascii() {
        value = ascii_digits(&value)?;
    }
    let parsed = match value.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok().map(|v| v / 100.0),
        None => value.parse::<f64>().ok(),
    };
    parsed.filter(|v| v.is_finite())
}

/// 把 Unicode Nd 数字换算为 ASCII 数字；遇到其他非 ASCII 字符返回 `None`。
/// Nd 数字总是以 0..9 连续成组出现，数值即与所在连续区段起点的偏移量模 10。
fn ascii_digits(value: &str) -> Option<String> {
    let nd = Regex::new(r"^\p{Nd}$").ok()?;
    let is_nd = |c: char| nd.is_match(c.encode_utf8(&mut [0u8; 4]));
    value
        .chars()
        .map(|c| {
            if c.is_ascii() {
                return Some(c);
            }
            if !is_nd(c) {
                return None;
            }
            let mut start = c as u32;
            while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
                if !is_nd(prev) {
                    break;
                }
                start -= 1;
            }
            char::from_digit((c as u32 - start) % 10, 10)
        })
        .collect()
}

/// 去掉备注两端的空白与引号
pub fn clean_note(note: Option<&str>) -> String {
    match note {
        Some(n) => n.trim().trim_matches('"').trim_matches('\'').to_string(),
        None => String::new(),
    }
}
