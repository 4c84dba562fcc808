use crate::error::Result;
use url::Url;

/// Path of the "load more" variant of the demo shop, relative to the site root
const SHOP_PATH: &str = "test-sites/e-commerce/more/";

/// One listing page of the shop and the name its export is written under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub url: Url,
}

impl Category {
    fn new(name: &'static str, url: Url) -> Self {
        Self { name, url }
    }
}

/// Derives the six category targets from the site root, in crawl order
pub fn categories(base_url: &str) -> Result<Vec<Category>> {
    let base = Url::parse(base_url)?;
    let home = base.join(SHOP_PATH)?;

    let computers = home.join("computers")?;
    let laptops = child(&computers, "laptops")?;
    let tablets = child(&computers, "tablets")?;

    let phones = home.join("phones")?;
    let touch = child(&phones, "touch")?;

    Ok(vec![
        Category::new("home", home),
        Category::new("computers", computers),
        Category::new("laptops", laptops),
        Category::new("tablets", tablets),
        Category::new("phones", phones),
        Category::new("touch", touch),
    ])
}

// `Url::join` would replace the last segment of a slash-less URL
fn child(parent: &Url, segment: &str) -> Result<Url> {
    Ok(Url::parse(&format!("{}/{}", parent.as_str(), segment))?)
}
