//! Brand link extraction tests against a realistic listing page fragment.

use depot_crawler::application::brand_discovery::{extract_brand_links, parse_brand_page_url};
use depot_crawler::domain::SubDepartment;

const BASE_URL: &str = "https://www.homedepot.com";

fn dishwashers() -> SubDepartment {
    SubDepartment {
        base_url: "b/Appliances-Dishwashers",
        nav_param: "5yc1vZc3po",
        brands: &["LG-Electronics", "Samsung"],
    }
}

const LISTING_HTML: &str = r#"
<html><body>
  <nav>
    <a href="/b/Appliances/N-5yc1vZbv1w">All Appliances</a>
    <a href="/b/Appliances-Dishwashers/Samsung/N-5yc1vZc3poZbwo5">Samsung</a>
    <a href="https://www.homedepot.com/b/Appliances-Dishwashers/LG-Electronics/N-5yc1vZc3poZxyz">LG</a>
    <a href="/b/Appliances-Dishwashers/Bosch/N-5yc1vZc3poZqqq">Bosch</a>
    <a href="/b/Appliances-Dishwashers/Samsung/N-5yc1vZc3poZbwo5">Samsung again</a>
    <a href="mailto:support@example.com">Contact</a>
  </nav>
</body></html>
"#;

#[test]
fn test_only_configured_brand_links_survive() {
    let links = extract_brand_links(LISTING_HTML, &dishwashers(), BASE_URL);

    assert_eq!(
        links,
        vec![
            "https://www.homedepot.com/b/Appliances-Dishwashers/Samsung/N-5yc1vZc3poZbwo5",
            "https://www.homedepot.com/b/Appliances-Dishwashers/LG-Electronics/N-5yc1vZc3poZxyz",
        ]
    );
}

#[test]
fn test_extracted_links_parse_into_crawl_tokens() {
    let links = extract_brand_links(LISTING_HTML, &dishwashers(), BASE_URL);

    let samsung = parse_brand_page_url(&links[0]).unwrap();
    assert_eq!(samsung.sub_department, "Dishwashers");
    assert_eq!(samsung.brand, "Samsung");
    assert_eq!(samsung.nav_param, "5yc1vZc3poZbwo5");

    let lg = parse_brand_page_url(&links[1]).unwrap();
    assert_eq!(lg.brand, "Electronics");
    assert_eq!(lg.nav_param, "5yc1vZc3poZxyz");
}

#[test]
fn test_no_matching_links_yields_empty() {
    let html = r#"<a href="/b/Appliances-Refrigerators/GE/N-5yc1vZc3piZabc">GE</a>"#;
    let links = extract_brand_links(html, &dishwashers(), BASE_URL);
    assert!(links.is_empty());
}
