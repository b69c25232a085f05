//! Schema-level tests against the in-memory store

use async_graphql::{Request, Response, Variables};
use graphql_api::{build_schema, ApiSchema, MemoryStore, SharedStore};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

fn schema() -> ApiSchema {
    let store: SharedStore = Arc::new(MemoryStore::new());
    build_schema(store)
}

async fn execute(schema: &ApiSchema, query: &str, variables: Value) -> Response {
    schema
        .execute(Request::new(query).variables(Variables::from_json(variables)))
        .await
}

fn data(response: Response) -> Value {
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.data.into_json().unwrap()
}

async fn create_user(schema: &ApiSchema, name: &str, balance: f64) -> Value {
    let response = execute(
        schema,
        "mutation ($dto: CreateUserInput!) { createUser(dto: $dto) { id name balance } }",
        json!({ "dto": { "name": name, "balance": balance } }),
    )
    .await;
    data(response)["createUser"].clone()
}

#[tokio::test]
async fn test_missing_user_is_null_not_error() {
    let schema = schema();
    let response = execute(
        &schema,
        "query ($id: UUID!) { user(id: $id) { id name } }",
        json!({ "id": Uuid::new_v4().to_string() }),
    )
    .await;

    assert_eq!(data(response), json!({ "user": null }));
}

#[tokio::test]
async fn test_create_user_returns_generated_id() {
    let schema = schema();
    let user = create_user(&schema, "A", 10.0).await;

    let id = user["id"].as_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());
    assert_eq!(user["name"], "A");
    assert_eq!(user["balance"], 10.0);
}

#[tokio::test]
async fn test_users_lists_every_created_user() {
    let schema = schema();
    let mut created = HashSet::new();
    for (i, name) in ["ann", "bob", "cy"].iter().enumerate() {
        let user = create_user(&schema, name, i as f64).await;
        created.insert(user["id"].as_str().unwrap().to_string());
    }

    let response = execute(&schema, "{ users { id } }", json!({})).await;
    let listed: HashSet<String> = data(response)["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(listed, created);
}

#[tokio::test]
async fn test_delete_missing_user_is_field_error() {
    let schema = schema();
    let response = execute(
        &schema,
        "mutation ($id: UUID!) { deleteUser(id: $id) }",
        json!({ "id": Uuid::new_v4().to_string() }),
    )
    .await;

    assert_eq!(response.errors.len(), 1);
    let error = &response.errors[0];
    assert_eq!(error.path.len(), 1);
    let code = error.extensions.as_ref().and_then(|ext| ext.get("code")).cloned();
    assert_eq!(code, Some(async_graphql::Value::from("NOT_FOUND")));

    let data = response.data.into_json().unwrap();
    assert!(data.pointer("/deleteUser").map_or(true, Value::is_null));
}

#[tokio::test]
async fn test_delete_user_returns_id() {
    let schema = schema();
    let user = create_user(&schema, "gone", 0.0).await;
    let id = user["id"].as_str().unwrap();

    let response = execute(
        &schema,
        "mutation ($id: UUID!) { deleteUser(id: $id) }",
        json!({ "id": id }),
    )
    .await;
    assert_eq!(data(response)["deleteUser"], id);

    let response = execute(
        &schema,
        "query ($id: UUID!) { user(id: $id) { id } }",
        json!({ "id": id }),
    )
    .await;
    assert_eq!(data(response)["user"], Value::Null);
}

#[tokio::test]
async fn test_seeded_member_type() {
    let schema = schema();
    let response = execute(
        &schema,
        "{ memberType(id: basic) { id discount postsLimitPerMonth } }",
        json!({}),
    )
    .await;

    assert_eq!(
        data(response),
        json!({ "memberType": { "id": "basic", "discount": 2.3, "postsLimitPerMonth": 20 } })
    );

    let response = execute(&schema, "{ memberTypes { id } }", json!({})).await;
    assert_eq!(
        data(response),
        json!({ "memberTypes": [{ "id": "basic" }, { "id": "business" }] })
    );
}

#[tokio::test]
async fn test_unknown_member_type_fails_before_resolution() {
    let schema = schema();

    let response = execute(&schema, "{ memberType(id: unknown) { id } }", json!({})).await;
    assert!(!response.errors.is_empty());
    assert_eq!(response.data, async_graphql::Value::Null);

    let response = execute(
        &schema,
        "query ($id: MemberTypeId!) { memberType(id: $id) { id } }",
        json!({ "id": "unknown" }),
    )
    .await;
    assert!(!response.errors.is_empty());
    assert_eq!(response.data, async_graphql::Value::Null);
}

#[tokio::test]
async fn test_malformed_uuid_is_rejected() {
    let schema = schema();
    let response = execute(&schema, r#"{ user(id: "not-a-uuid") { id } }"#, json!({})).await;

    assert!(!response.errors.is_empty());
    assert_eq!(response.data, async_graphql::Value::Null);
    assert!(response.errors[0].message.contains("UUID"));
}

#[tokio::test]
async fn test_nested_relations_resolve() {
    let schema = schema();
    let user = create_user(&schema, "nested", 42.0).await;
    let user_id = user["id"].as_str().unwrap();

    let profile = execute(
        &schema,
        "mutation ($dto: CreateProfileInput!) { createProfile(dto: $dto) { id memberTypeId } }",
        json!({ "dto": {
            "isMale": true,
            "yearOfBirth": 1990,
            "userId": user_id,
            "memberTypeId": "business"
        } }),
    )
    .await;
    assert_eq!(data(profile)["createProfile"]["memberTypeId"], "business");

    let post = execute(
        &schema,
        "mutation ($dto: CreatePostInput!) { createPost(dto: $dto) { id author { name } } }",
        json!({ "dto": { "title": "t", "content": "c", "authorId": user_id } }),
    )
    .await;
    assert_eq!(data(post)["createPost"]["author"]["name"], "nested");

    let response = execute(
        &schema,
        r#"query ($id: UUID!) {
            user(id: $id) {
                profile { yearOfBirth memberType { discount } user { id } }
                posts { title }
            }
        }"#,
        json!({ "id": user_id }),
    )
    .await;

    let user = &data(response)["user"];
    assert_eq!(user["profile"]["memberType"]["discount"], 7.7);
    assert_eq!(user["profile"]["yearOfBirth"], 1990);
    assert_eq!(user["profile"]["user"]["id"], user_id);
    assert_eq!(user["posts"], json!([{ "title": "t" }]));
}

#[tokio::test]
async fn test_member_type_lists_its_profiles() {
    let schema = schema();
    let user = create_user(&schema, "tiered", 1.0).await;
    let user_id = user["id"].as_str().unwrap();

    let response = execute(
        &schema,
        "mutation ($dto: CreateProfileInput!) { createProfile(dto: $dto) { id } }",
        json!({
            "dto": {
                "isMale": false,
                "yearOfBirth": 2000,
                "userId": user_id,
                "memberTypeId": "basic"
            }
        }),
    )
    .await;
    let profile_id = data(response)["createProfile"]["id"].clone();

    let response = execute(
        &schema,
        "{ basic: memberType(id: basic) { profiles { id } } \
           business: memberType(id: business) { profiles { id } } }",
        json!({}),
    )
    .await;
    let tiers = data(response);
    assert_eq!(tiers["basic"]["profiles"], json!([{ "id": profile_id }]));
    assert_eq!(tiers["business"]["profiles"], json!([]));
}

#[tokio::test]
async fn test_create_post_for_missing_author_is_store_error() {
    let schema = schema();
    let response = execute(
        &schema,
        "mutation ($dto: CreatePostInput!) { createPost(dto: $dto) { id } }",
        json!({ "dto": { "title": "t", "content": "c", "authorId": Uuid::new_v4().to_string() } }),
    )
    .await;

    assert_eq!(response.errors.len(), 1);
    let code = response.errors[0]
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("code"))
        .cloned();
    assert_eq!(code, Some(async_graphql::Value::from("CONSTRAINT_VIOLATION")));
}

#[tokio::test]
async fn test_post_and_profile_round_trip_and_delete() {
    let schema = schema();
    let user = create_user(&schema, "writer", 5.0).await;
    let user_id = user["id"].as_str().unwrap();

    let response = execute(
        &schema,
        "mutation ($dto: CreatePostInput!) { createPost(dto: $dto) { id title content authorId } }",
        json!({ "dto": { "title": "hello", "content": "world", "authorId": user_id } }),
    )
    .await;
    let post = data(response)["createPost"].clone();
    assert_eq!(post["authorId"], user_id);

    let response = execute(
        &schema,
        "query ($id: UUID!) { post(id: $id) { title content } posts { id } }",
        json!({ "id": post["id"] }),
    )
    .await;
    let body = data(response);
    assert_eq!(body["post"], json!({ "title": "hello", "content": "world" }));
    assert_eq!(body["posts"], json!([{ "id": post["id"] }]));

    let response = execute(
        &schema,
        "mutation ($dto: CreateProfileInput!) { createProfile(dto: $dto) { id } }",
        json!({
            "dto": {
                "isMale": true,
                "yearOfBirth": 1985,
                "userId": user_id,
                "memberTypeId": "basic"
            }
        }),
    )
    .await;
    let profile_id = data(response)["createProfile"]["id"].clone();

    let response = execute(
        &schema,
        "query ($id: UUID!) { profile(id: $id) { isMale userId } profiles { id } }",
        json!({ "id": profile_id }),
    )
    .await;
    let body = data(response);
    assert_eq!(body["profile"], json!({ "isMale": true, "userId": user_id }));
    assert_eq!(body["profiles"], json!([{ "id": profile_id }]));

    let response = execute(
        &schema,
        "mutation ($post: UUID!, $profile: UUID!) { \
           deletePost(id: $post) deleteProfile(id: $profile) }",
        json!({ "post": post["id"], "profile": profile_id }),
    )
    .await;
    assert_eq!(
        data(response),
        json!({ "deletePost": post["id"], "deleteProfile": profile_id })
    );
}

#[tokio::test]
async fn test_member_types_have_no_mutations() {
    let sdl = schema().sdl();
    assert!(sdl.contains("scalar UUID"));
    assert!(sdl.contains("enum MemberTypeId"));
    assert!(sdl.contains("createProfile(dto: CreateProfileInput!): Profile!"));
    assert!(!sdl.contains("createMemberType"));
    assert!(!sdl.contains("deleteMemberType"));
}
