use phf::phf_set;

use crate::config::Config;
use crate::models::notice::RejectReason;
use crate::models::upload::RawFile;

/// 允许上传的内容类型
pub static ACCEPTED_CONTENT_TYPES: phf::Set<&'static str> = phf_set! {
    "application/pdf",
    "text/plain",
};

/// 默认单文件大小上限：10 MiB（包含）
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// 上传校验规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadRules {
    pub max_file_size: u64,
}

impl Default for UploadRules {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl UploadRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_file_size: config.max_file_size,
        }
    }

    /// 返回文件违反的所有规则；类型与大小分别检查，空列表表示通过
    pub fn check(&self, file: &RawFile) -> Vec<RejectReason> {
        let mut reasons = Vec::new();

        if !ACCEPTED_CONTENT_TYPES.contains(file.content_type.as_str()) {
            reasons.push(RejectReason::UnsupportedType {
                content_type: file.content_type.clone(),
            });
        }

        if file.size > self.max_file_size {
            reasons.push(RejectReason::TooLarge {
                size: file.size,
                limit: self.max_file_size,
            });
        }

        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_accepts_pdf_and_text() {
        let rules = UploadRules::default();
        assert!(rules.check(&RawFile::new("a.pdf", MIB, "application/pdf")).is_empty());
        assert!(rules.check(&RawFile::new("a.txt", 0, "text/plain")).is_empty());
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let rules = UploadRules::default();
        assert!(rules.check(&RawFile::new("edge.pdf", 10 * MIB, "application/pdf")).is_empty());

        let reasons = rules.check(&RawFile::new("big.pdf", 10 * MIB + 1, "application/pdf"));
        assert_eq!(
            reasons,
            vec![RejectReason::TooLarge {
                size: 10 * MIB + 1,
                limit: 10 * MIB
            }]
        );
    }

    #[test]
    fn test_both_rules_reported() {
        let reasons = UploadRules::default().check(&RawFile::new("x.png", 11 * MIB, "image/png"));
        assert_eq!(reasons.len(), 2);
        assert!(matches!(reasons[0], RejectReason::UnsupportedType { .. }));
        assert!(matches!(reasons[1], RejectReason::TooLarge { .. }));
    }

    #[test]
    fn test_content_type_is_exact_match() {
        let rules = UploadRules::default();
        assert_eq!(rules.check(&RawFile::new("a.txt", 1, "Text/Plain")).len(), 1);
        assert_eq!(rules.check(&RawFile::new("a.txt", 1, "text/plain; charset=utf-8")).len(), 1);
    }
}
