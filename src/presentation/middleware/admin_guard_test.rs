#[cfg(test)]
mod tests {
    use super::super::extract_cookie;
    use crate::infrastructure::database::entities::{session, user};
    use crate::presentation::middleware::admin_guard::{admin_guard, AuthState, AuthUser};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use chrono::{Duration, Utc};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    const COOKIE_NAME: &str = "session_token";

    async fn setup_app() -> (Router, Arc<DatabaseConnection>) {
        // 内存SQLite，单连接保证所有查询命中同一个库
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);

        let db = Database::connect(opt).await.expect("connect sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        let db = Arc::new(db);

        let auth_state = AuthState {
            db: db.clone(),
            session_cookie: COOKIE_NAME.to_string(),
        };

        // 处理器回显注入的 AuthUser，验证扩展确实到达
        let app = Router::new()
            .route(
                "/api/supervision/stats",
                get(|Extension(user): Extension<AuthUser>| async move { user.full_name }),
            )
            .layer(middleware::from_fn_with_state(auth_state, admin_guard));

        (app, db)
    }

    async fn seed_session(
        db: &DatabaseConnection,
        full_name: &str,
        role: &str,
        token: &str,
        ttl: Duration,
    ) {
        let user_id = Uuid::new_v4();

        user::ActiveModel {
            id: Set(user_id),
            email: Set(format!("{}@asesoria.test", token)),
            full_name: Set(full_name.to_string()),
            role: Set(role.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await
        .expect("insert user");

        session::ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id),
            expires_at: Set((Utc::now() + ttl).into()),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await
        .expect("insert session");
    }

    async fn error_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn test_admin_guard_missing_cookie() {
        let (app, _db) = setup_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/supervision/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = error_body(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_admin_guard_unknown_token() {
        let (app, _db) = setup_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/supervision/stats")
                    .header(header::COOKIE, format!("{}=no-such-token", COOKIE_NAME))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_guard_expired_session() {
        let (app, db) = setup_app().await;
        seed_session(&db, "Marta", "admin", "tok-expired", Duration::hours(-1)).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/supervision/stats")
                    .header(header::COOKIE, format!("{}=tok-expired", COOKIE_NAME))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = error_body(response).await;
        assert_eq!(body["error"], "session expired");
    }

    #[tokio::test]
    async fn test_admin_guard_rejects_non_admin() {
        let (app, db) = setup_app().await;
        seed_session(&db, "Luis", "empleado", "tok-empleado", Duration::hours(1)).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/supervision/stats")
                    .header(header::COOKIE, format!("{}=tok-empleado", COOKIE_NAME))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = error_body(response).await;
        assert_eq!(body["error"], "admin role required");
    }

    #[tokio::test]
    async fn test_admin_guard_injects_auth_user() {
        let (app, db) = setup_app().await;
        seed_session(&db, "Ana", "admin", "tok-admin", Duration::hours(1)).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/supervision/stats")
                    .header(
                        header::COOKIE,
                        format!("theme=dark; {}=tok-admin", COOKIE_NAME),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        assert_eq!(&bytes[..], b"Ana");
    }

    #[test]
    fn test_extract_cookie_single_pair() {
        assert_eq!(
            extract_cookie("session_token=abc123", "session_token"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_cookie_among_others() {
        let header = "theme=dark; session_token=tok-1; lang=es";
        assert_eq!(
            extract_cookie(header, "session_token"),
            Some("tok-1".to_string())
        );
    }

    #[test]
    fn test_extract_cookie_missing() {
        assert_eq!(extract_cookie("theme=dark", "session_token"), None);
    }

    #[test]
    fn test_extract_cookie_does_not_match_prefix() {
        assert_eq!(
            extract_cookie("session_token_old=zzz", "session_token"),
            None
        );
    }
}
