//! Fixed values of the target site's search API.
//!
//! These are external contract constants: the endpoint path, the header
//! variants the API switches on, the maximum page size the API accepts and
//! the GraphQL text of the `searchModel` operation. None of them are
//! user-configurable.

/// Site root all department, brand and API paths hang off.
pub const BASE_URL: &str = "https://www.homedepot.com";

/// Path of the GraphQL-style search endpoint (POST).
pub const SEARCH_ENDPOINT_PATH: &str = "/product-information/model";

/// Fixed user-agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Header the API uses to route requests to the right backend experience.
pub const EXPERIENCE_HEADER: &str = "x-experience-name";

/// Experience for major appliances (dishwashers, refrigerators).
pub const EXPERIENCE_MAJOR_APPLIANCES: &str = "major-appliances";

/// Experience for everything else (furniture, mattresses).
pub const EXPERIENCE_HD_HOME: &str = "hd-home";

/// GraphQL operation name of the search request.
pub const OPERATION_NAME: &str = "searchModel";

/// Maximum number of results the API returns per call.
pub const MAX_PAGE_SIZE: u32 = 48;

/// Fixed GraphQL query text for the `searchModel` operation. Requests only
/// the fields the extraction step consumes.
pub const SEARCH_MODEL_QUERY: &str = r#"query searchModel($navParam: String!, $storeId: String, $pageSize: Int, $startIndex: Int) {
  searchModel(navParam: $navParam, storeId: $storeId) {
    products(pageSize: $pageSize, startIndex: $startIndex) {
      itemId
      identifiers {
        canonicalUrl
        brandName
        modelNumber
        productType
        productLabel
      }
      availabilityType {
        discontinued
        type
      }
      reviews {
        ratingsReviews {
          averageRating
          totalReviews
        }
      }
      pricing(storeId: $storeId) {
        value
      }
      keyProductFeatures {
        keyProductFeaturesItems {
          features {
            name
            value
          }
        }
      }
    }
    searchReport {
      totalProducts
      startIndex
      pageSize
    }
  }
}"#;

/// Experience header value for a sub-department, as the API expects it.
///
/// The API serves the two major-appliance sub-departments from a different
/// backend than the home/furniture catalog.
pub fn experience_name(sub_department: &str) -> &'static str {
    match sub_department {
        "Dishwashers" | "Refrigerators" => EXPERIENCE_MAJOR_APPLIANCES,
        _ => EXPERIENCE_HD_HOME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_name_mapping() {
        assert_eq!(experience_name("Dishwashers"), EXPERIENCE_MAJOR_APPLIANCES);
        assert_eq!(experience_name("Refrigerators"), EXPERIENCE_MAJOR_APPLIANCES);
        assert_eq!(experience_name("Mattresses"), EXPERIENCE_HD_HOME);
        assert_eq!(experience_name("Sofas"), EXPERIENCE_HD_HOME);
    }
}
