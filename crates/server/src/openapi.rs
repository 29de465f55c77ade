use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

/// Wire shape of a stored news item.
#[derive(Serialize, ToSchema)]
pub struct NewsItemDoc {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub snippet: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub language: Option<String>,
    #[schema(format = DateTime)]
    pub published_at: Option<String>,
    pub source: Option<String>,
    pub categories: Option<String>,
}

/// Multipart form for create and full update. On create `title` and `description` are required.
#[derive(Serialize, ToSchema)]
pub struct NewsFormDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub snippet: Option<String>,
    pub url: Option<String>,
    pub language: Option<String>,
    pub source: Option<String>,
    pub categories: Option<String>,
    #[schema(format = Binary)]
    pub image: Option<String>,
}

/// Partial update body. Unknown keys, `id` and `published_at` are ignored.
#[derive(Serialize, ToSchema)]
pub struct NewsPatchDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub snippet: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub language: Option<String>,
    pub source: Option<String>,
    pub categories: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::news::list,
        crate::routes::news::get,
        crate::routes::news::create,
        crate::routes::news::update,
        crate::routes::news::patch,
        crate::routes::news::delete,
    ),
    components(
        schemas(
            HealthResponse,
            NewsItemDoc,
            NewsFormDoc,
            NewsPatchDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "news")
    )
)]
pub struct ApiDoc;
