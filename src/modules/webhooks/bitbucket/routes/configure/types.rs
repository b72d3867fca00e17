pub mod request {
    pub struct Payload {
        /// Path the descriptor was requested on, without a trailing slash.
        pub mount_path: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Deserialize, Serialize)]
    pub struct Vendor {
        pub name: String,
        pub url: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct Authentication {
        pub r#type: String,
    }

    /// Bitbucket Connect app descriptor, fetched by Bitbucket from the app's
    /// base url on install.
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Descriptor {
        pub key: String,
        pub name: String,
        pub description: String,
        pub vendor: Vendor,
        pub base_url: String,
        pub authentication: Authentication,
        pub scopes: Vec<String>,
        pub contexts: Vec<String>,
    }

    pub enum Success {
        Descriptor(Descriptor),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Descriptor(descriptor) => (StatusCode::OK, Json(descriptor)).into_response(),
            }
        }
    }
}
