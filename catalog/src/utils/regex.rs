use regex::Regex;

use crate::errors::CatalogError;

/// Returns the first `N` capture groups, or a mismatch error naming the
/// pattern and the text it was run against.
pub(crate) fn unwrap_regex_captures<const N: usize>(
    regex: &Regex,
    haystack: &str,
) -> Result<[String; N], CatalogError> {
    let mismatch = || CatalogError::PatternMismatch {
        pattern: regex.as_str().into(),
        haystack: haystack.into(),
    };

    let Some(captures) = regex.captures(haystack) else {
        return Err(mismatch());
    };

    let mut groups: [String; N] = std::array::from_fn(|_| String::new());

    for (index, group) in groups.iter_mut().enumerate() {
        let Some(result) = captures.get(index + 1) else {
            return Err(mismatch());
        };

        *group = result.as_str().to_string();
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_groups_in_order() {
        let regex = Regex::new(r"(\d+)x(\d+)").unwrap();

        let [width, height] = unwrap_regex_captures(&regex, "IPS 2560x1440 165 Гц").unwrap();

        assert_eq!((width.as_str(), height.as_str()), ("2560", "1440"));
    }

    #[test]
    fn reports_pattern_and_haystack_on_mismatch() {
        let regex = Regex::new(r"(\d+x\d+)").unwrap();

        let err = unwrap_regex_captures::<1>(&regex, "Нет").unwrap_err();

        assert!(matches!(
            err,
            CatalogError::PatternMismatch { ref haystack, .. } if haystack == "Нет"
        ));
    }

    #[test]
    fn optional_group_that_did_not_participate_is_a_mismatch() {
        let regex = Regex::new(r"(\d+)(?: (ГБ))?").unwrap();

        assert!(unwrap_regex_captures::<2>(&regex, "16").is_err());
    }
}
