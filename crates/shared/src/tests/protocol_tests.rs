use super::*;
use crate::error::ApiError;

const PAGE_BODY: &str = r#"{
  "items": [
    {"id": 1, "name": "Goku", "ki": "60.000.000", "maxKi": "90 Septillion", "race": "Saiyan",
     "gender": "Male", "description": "El protagonista", "image": "https://img/goku.webp",
     "affiliation": "Z Fighter", "deletedAt": null},
    {"name": "Nameless", "race": "Unknown"},
    {"id": 0, "name": "Zero", "race": "Unknown"},
    {"id": 3, "name": "Piccolo", "race": "Namekian"}
  ],
  "meta": {"totalItems": 58, "itemCount": 4, "itemsPerPage": 10, "totalPages": 6, "currentPage": 1},
  "links": {"first": "/characters?limit=10", "previous": "", "next": "/characters?page=2&limit=10", "last": "/characters?page=6&limit=10"}
}"#;

#[test]
fn page_response_decodes_and_skips_items_without_identity() {
    let response: CharacterPageResponse = serde_json::from_str(PAGE_BODY).expect("decode page");
    let decoded = response.into_page();

    assert_eq!(decoded.skipped, 2);
    let ids: Vec<i64> = decoded.page.items.iter().map(|c| c.id.0).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(decoded.page.items[0].max_ki, "90 Septillion");
    assert_eq!(decoded.page.items[0].category(), "Saiyan");
    assert_eq!(decoded.page.meta.current_page, 1);
    assert_eq!(decoded.page.meta.total_pages, 6);
}

#[test]
fn page_meta_is_clamped_to_at_least_one() {
    let body = r#"{"items": [], "meta": {"totalItems": 0, "itemCount": 0, "itemsPerPage": 10, "totalPages": 0, "currentPage": 0}}"#;
    let response: CharacterPageResponse = serde_json::from_str(body).expect("decode page");
    let decoded = response.into_page();

    assert_eq!(decoded.page.meta.current_page, 1);
    assert_eq!(decoded.page.meta.total_pages, 1);
}

#[test]
fn detail_response_flattens_character_fields() {
    let body = r#"{
      "id": 2, "name": "Vegeta", "race": "Saiyan", "ki": "54.000.000", "maxKi": "19.84 Septillion",
      "gender": "Male", "description": "Príncipe", "image": "https://img/vegeta.webp",
      "affiliation": "Z Fighter",
      "originPlanet": {"id": 2, "name": "Vegeta", "isDestroyed": true, "description": "Planeta", "image": "https://img/planet.webp"},
      "transformations": [{"id": 8, "name": "Vegeta SSJ", "image": "https://img/ssj.webp", "ki": "330.000.000"}]
    }"#;
    let response: CharacterDetailResponse = serde_json::from_str(body).expect("decode detail");
    let detail = response.into_detail().expect("detail has id");

    assert_eq!(detail.character.id, CharacterId(2));
    assert_eq!(detail.character.description, "Príncipe");
    let planet = detail.origin_planet.expect("origin planet");
    assert!(planet.is_destroyed);
    assert_eq!(detail.transformations.len(), 1);
    assert_eq!(detail.transformations[0].id, TransformationId(8));
}

#[test]
fn api_error_falls_back_to_raw_body() {
    let parsed = ApiError::from_body(404, r#"{"message": "Character not found", "error": "Not Found", "statusCode": 404}"#);
    assert_eq!(parsed.status_code, 404);
    assert_eq!(parsed.message, "Character not found");

    let raw = ApiError::from_body(502, "<html>bad gateway</html>");
    assert_eq!(raw.status_code, 502);
    assert_eq!(raw.message, "<html>bad gateway</html>");

    let empty = ApiError::from_body(500, "  ");
    assert_eq!(empty.message, "empty response body");
}
