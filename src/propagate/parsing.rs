use super::error::PropagationError;

/// Splits TLE text lines into `(name, line1, line2)`. The name line is optional.
pub fn parse_tle_lines<S: AsRef<str>>(
    lines: &[S],
) -> Result<(Option<String>, String, String), PropagationError> {
    let lines: Vec<String> = lines
        .iter()
        .flat_map(|l| l.as_ref().lines())
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    match lines.len() {
        2 => Ok((None, lines[0].clone(), lines[1].clone())),
        3 => Ok((Some(lines[0].clone()), lines[1].clone(), lines[2].clone())),
        n => Err(PropagationError::InvalidTleFormat(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_line_is_optional() {
        let (name, l1, l2) = parse_tle_lines(&["1 a", "2 b"]).unwrap();
        assert_eq!((name, l1.as_str(), l2.as_str()), (None, "1 a", "2 b"));

        let (name, _, _) = parse_tle_lines(&[" ISS (ZARYA) ", "1 a", "2 b", ""]).unwrap();
        assert_eq!(name.as_deref(), Some("ISS (ZARYA)"));
    }

    #[test]
    fn accepts_a_single_multiline_block() {
        let (name, _, l2) = parse_tle_lines(&["SAT\n1 a\n2 b\n"]).unwrap();
        assert_eq!(name.as_deref(), Some("SAT"));
        assert_eq!(l2, "2 b");
    }

    #[test]
    fn wrong_line_count() {
        assert!(matches!(
            parse_tle_lines(&["1 a"]),
            Err(PropagationError::InvalidTleFormat(1))
        ));
    }
}
