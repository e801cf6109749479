use crate::error::InputError;

/// Split a comma-separated line into city names.
///
/// Items are trimmed and blank items dropped; nothing left is an error.
pub fn parse_cities(line: &str) -> Result<Vec<String>, InputError> {
    let cities: Vec<String> = line
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    if cities.is_empty() {
        return Err(InputError::NoCities);
    }

    Ok(cities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_each_city() {
        let cities = parse_cities("London, Paris").unwrap();
        assert_eq!(cities, vec!["London", "Paris"]);
    }

    #[test]
    fn drops_empty_items() {
        let cities = parse_cities("Tokyo, , Osaka,").unwrap();
        assert_eq!(cities, vec!["Tokyo", "Osaka"]);
    }

    #[test]
    fn keeps_inner_spaces() {
        let cities = parse_cities(" New York ,Rio de Janeiro").unwrap();
        assert_eq!(cities, vec!["New York", "Rio de Janeiro"]);
    }

    #[test]
    fn only_commas_is_an_error() {
        assert_eq!(parse_cities("  ,  ,  "), Err(InputError::NoCities));
        assert_eq!(parse_cities(""), Err(InputError::NoCities));
    }
}
