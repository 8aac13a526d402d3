//! Discovered notebook URLs persisted between discovery and collection.

use std::{fs, path::Path};

use tracing::info;

use crate::errors::CatalogError;

/// One URL per line, in discovery order
pub fn write_urls(path: impl AsRef<Path>, urls: &[String]) -> Result<(), CatalogError> {
    let path = path.as_ref();

    fs::write(path, urls.join("\n"))?;
    info!("Saved {} URLs to {}", urls.len(), path.display());

    Ok(())
}

/// Blank lines and surrounding whitespace are ignored
pub fn read_urls(path: impl AsRef<Path>) -> Result<Vec<String>, CatalogError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let urls: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    info!("Loaded {} URLs from {}", urls.len(), path.display());

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn written_list_reads_back_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        let urls = vec![
            "https://www.dns-shop.ru/product/b/characteristics/".to_string(),
            "https://www.dns-shop.ru/product/a/characteristics/".to_string(),
            "https://www.dns-shop.ru/product/b/characteristics/".to_string(),
        ];

        write_urls(&path, &urls).unwrap();

        assert_eq!(read_urls(&path).unwrap(), urls);
    }

    #[test]
    fn hand_edited_lists_are_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        fs::write(&path, "  https://a/1/ \r\n\n\nhttps://a/2/\n").unwrap();

        assert_eq!(read_urls(&path).unwrap(), vec!["https://a/1/", "https://a/2/"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();

        assert!(matches!(
            read_urls(dir.path().join("absent.txt")),
            Err(CatalogError::UrlList(_))
        ));
    }
}
