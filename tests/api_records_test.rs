//! Integration tests for the roster records endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use allot::allocation::AllocationError;
    use allot::api::public::ErrorResponse;
    use allot::core::AppConfig;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::util::ServiceExt;

    use crate::test_utils::{IDENTITY, StubCalendar, StubSheets, body_to_string, test_app, test_app_with};

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn app_with_sheets(sheets: StubSheets) -> axum::Router {
        test_app_with(
            AppConfig::for_identity(IDENTITY),
            Arc::new(StubCalendar::default()),
            sheets,
        )
    }

    /// Tests the roster is returned as HTML
    #[tokio::test]
    async fn it_returns_the_roster_as_html() {
        let app = test_app(vec![]);

        let response = app
            .oneshot(get("/records?sheet_name=Team%20Roster"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );

        let body = body_to_string(response.into_body()).await;
        assert_eq!(body, "<ul><li><b>Team Roster</b></li></ul>");
    }

    /// Tests records endpoint returns 400 when the sheet name is missing
    #[tokio::test]
    async fn it_returns_400_for_missing_sheet_name() {
        let app = test_app(vec![]);

        let response = app.oneshot(get("/records")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_to_string(response.into_body()).await;
        let err: ErrorResponse = serde_json::from_str(&body).unwrap();
        assert!(err.error.contains("sheet_name"));
    }

    /// Tests a missing spreadsheet id is a server side error
    #[tokio::test]
    async fn it_returns_500_when_unconfigured() {
        let app = app_with_sheets(StubSheets {
            fail_with: Some(AllocationError::ConfigurationError(
                "ALLOT_SPREADSHEET_ID is not set".to_string(),
            )),
            fail_untyped: false,
        });

        let response = app.oneshot(get("/records?sheet_name=Roster")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("ALLOT_SPREADSHEET_ID"));
    }

    /// Tests any other sheets failure is treated as upstream
    #[tokio::test]
    async fn it_returns_502_when_sheets_fails() {
        let app = app_with_sheets(StubSheets {
            fail_with: None,
            fail_untyped: true,
        });

        let response = app.oneshot(get("/records?sheet_name=Roster")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("connection reset"));
    }
}
