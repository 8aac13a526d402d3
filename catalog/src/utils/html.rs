use scraper::{ElementRef, Selector};
use tracing::error;

use crate::errors::CatalogError;

pub(crate) fn element_to_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().into()
}

pub(crate) fn element_extract_attr(
    element: ElementRef,
    attr_name: &str,
) -> Result<String, CatalogError> {
    let Some(attr_value) = element.attr(attr_name) else {
        error!(
            "Failed to find attribute {} in element {:?}",
            attr_name, element
        );
        return Err(CatalogError::HtmlElementMissingAttribute(
            attr_name.into(),
            element.html(),
        ));
    };

    Ok(attr_value.trim().into())
}

/// Only for selectors written into the source, a typo there is a bug
pub(crate) fn static_selector(query: &str) -> Selector {
    Selector::parse(query).unwrap_or_else(|err| panic!("invalid selector '{query}': {err}"))
}
