//! # 문자열 유틸리티
//!
//! 설정값 정리와 URL 경로 조합에 쓰이는 문자열 함수들입니다.

/// 선택적 문자열 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 으로 반환합니다.
/// 환경 변수처럼 "비어 있음"과 "없음"을 구분하지 않는 입력에 사용합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::clean_optional_string;
///
/// assert_eq!(clean_optional_string(Some("  users  ".to_string())), Some("users".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// assert_eq!(clean_optional_string(None), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 문자열이 유효한지 확인 (빈 문자열이 아니고 공백만으로 구성되지 않음)
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 경로 앞뒤의 슬래시를 제거합니다.
///
/// URL 조합 시 `//` 가 생기지 않도록 경로를 정규화합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(strip_slashes("/auth/steam/return/"), "auth/steam/return");
/// ```
pub fn strip_slashes(path: &str) -> &str {
    path.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_is_valid_string() {
        assert!(is_valid_string("steam"));
        assert!(is_valid_string("  steam  "));
        assert!(!is_valid_string(""));
        assert!(!is_valid_string("\t\n"));
    }

    #[test]
    fn test_strip_slashes() {
        assert_eq!(strip_slashes("/auth/steam/return"), "auth/steam/return");
        assert_eq!(strip_slashes("auth/steam/"), "auth/steam");
        assert_eq!(strip_slashes("//"), "");
        assert_eq!(strip_slashes(""), "");
    }
}
