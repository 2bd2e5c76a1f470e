use crate::error::{GameLogError, Result};

/// Extracts the game ID from the last path segment of a game URL.
///
/// Follows `parseInt(segment, 10)`: leading whitespace and one sign are
/// accepted, then the leading run of digits is taken and anything after it
/// (query strings, fragments) is ignored. Returns `None` when there are no
/// leading digits or the value does not fit an `i64`.
pub fn parse_game_id(url: &str) -> Option<i64> {
    let segment = url.rsplit('/').next().unwrap_or(url);
    let segment = segment.trim_start();

    let (negative, rest) = match segment.as_bytes().first() {
        Some(b'-') => (true, &segment[1..]),
        Some(b'+') => (false, &segment[1..]),
        _ => (false, segment),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    let value = if negative {
        format!("-{}", digits).parse::<i64>().ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(value)
}

pub fn resolve_game_id(url: &str) -> Result<i64> {
    parse_game_id(url)
        .ok_or_else(|| GameLogError::InvalidGameId(format!("no game ID in URL {:?}", url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trailing_segment() {
        assert_eq!(
            parse_game_id("https://np.ironhelmet.com/game/34216"),
            Some(34216)
        );
    }

    #[test]
    fn ignores_trailing_garbage_like_parse_int() {
        assert_eq!(
            parse_game_id("https://np.ironhelmet.com/game/34216?tab=1"),
            Some(34216)
        );
        assert_eq!(parse_game_id("https://np.ironhelmet.com/game/12#map"), Some(12));
        assert_eq!(parse_game_id("https://example.com/ 77"), Some(77));
        assert_eq!(parse_game_id("https://example.com/-3"), Some(-3));
    }

    #[test]
    fn empty_or_text_segment_is_not_a_number() {
        assert_eq!(parse_game_id("https://np.ironhelmet.com/"), None);
        assert_eq!(parse_game_id("https://np.ironhelmet.com/#load_game"), None);
        assert_eq!(parse_game_id("https://example.com/game/abc123"), None);
        assert_eq!(parse_game_id(""), None);
        assert_eq!(parse_game_id("https://example.com/-"), None);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(parse_game_id("https://x/99999999999999999999999"), None);
    }

    #[test]
    fn resolve_maps_to_invalid_game_id() {
        let err = resolve_game_id("https://np.ironhelmet.com/").unwrap_err();
        assert!(matches!(err, GameLogError::InvalidGameId(_)));
        assert!(err.is_wrong_context());
        assert_eq!(resolve_game_id("https://x/game/5").unwrap(), 5);
    }
}
