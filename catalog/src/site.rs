//! Storefront specific constants: URLs, selectors and currency.

pub const BASE_URL: &str = "https://www.dns-shop.ru";
/// Gaming notebooks, `{page}` starts at 1
pub const LISTING_URL_TEMPLATE: &str =
    "https://www.dns-shop.ru/catalog/17a892f816404e77/noutbuki/?f[p3q]=b3ci&p={page}";
pub const CHARACTERISTICS_SUFFIX: &str = "characteristics/";

pub const ITEM_LINK_SELECTOR: &str = "a.catalog-product__name.ui-link.ui-link_black";

pub const PREVIOUS_PRICE_SELECTOR: &str = "span.product-buy__prev";
pub const ACTIVE_PRICE_SELECTOR: &str = "div.product-buy__price.product-buy__price_active";
pub const PRICE_SELECTOR: &str = "div.product-buy__price";
pub const CURRENCY_SIGN: char = '₽';

pub const CITY_LINK_SELECTOR: &str =
    ".header-top-menu__common-link.header-top-menu__common-link_city";
pub const CITY_INPUT_SELECTOR: &str = ".base-ui-input-search__input";
pub const CITY_SUGGESTION_SELECTOR: &str = "ul.cities-search > li";
pub const DEFAULT_CITY: &str = "Краснодар";
