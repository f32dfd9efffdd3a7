use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use rsvp_core::StoreError;
use rsvp_core::Unique;
use validator::Validate;

pub async fn register(
    db: web::Data<dyn Credentials>,
    hasher: web::Data<Hasher>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let RegisterRequest {
        email,
        password,
        name,
    } = req.into_inner();
    let hashword = web::block(move || hasher.hash(&password)).await??;
    match db.create(&name, &email, &hashword).await {
        Ok(member) => {
            log::info!("registered member {}", member.id());
            Ok(HttpResponse::Created().json(member))
        }
        Err(StoreError::Conflict) => {
            log::info!("registration rejected for duplicate email");
            Err(ApiError::Internal("could not create user"))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login(
    db: web::Data<dyn Credentials>,
    hasher: web::Data<Hasher>,
    tokens: web::Data<Crypto>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let LoginRequest { email, password } = req.into_inner();
    let found = db.lookup(&email).await?;
    let member = web::block(move || match found {
        Some((member, hashword)) => hasher.verify(&password, &hashword).then_some(member),
        None => {
            // burn the same work as a real verify so timing does not reveal unknown emails
            let _ = hasher.hash(&password);
            None
        }
    })
    .await?
    .ok_or(ApiError::Unauthorized(BAD_CREDENTIALS))?;
    let token = tokens.issue(member.id())?;
    log::info!("member {} logged in", member.id());
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub async fn me(auth: Auth) -> HttpResponse {
    HttpResponse::Ok().json(auth.member())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test;
    use std::sync::Arc;

    const SECRET: &[u8] = b"handler-secret";

    macro_rules! app {
        () => {{
            let store: Arc<dyn Credentials> = Arc::new(Memory::default());
            test::init_service(
                App::new()
                    .app_data(web::Data::new(Crypto::new(SECRET).unwrap()))
                    .app_data(web::Data::new(Hasher::new(8, 1, 1).unwrap()))
                    .app_data(web::Data::from(store))
                    .route("/register", web::post().to(register))
                    .route("/login", web::post().to(login))
                    .route("/me", web::get().to(me)),
            )
            .await
        }};
    }

    fn register_body(email: &str) -> serde_json::Value {
        serde_json::json!({ "email": email, "password": "longenough1", "name": "A" })
    }

    #[actix_web::test]
    async fn register_returns_public_projection() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(register_body("a@x.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["id"].is_string());
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["name"], "A");
        assert!(body.get("password").is_none());
        assert!(body.get("hashword").is_none());
    }

    #[actix_web::test]
    async fn register_validates_input() {
        let app = app!();
        let bodies = [
            serde_json::json!({ "email": "not-an-email", "password": "longenough1", "name": "A" }),
            serde_json::json!({ "email": "a@x.com", "password": "short", "name": "A" }),
            serde_json::json!({ "email": "a@x.com", "password": "longenough1", "name": "" }),
        ];
        for body in bodies {
            let req = test::TestRequest::post().uri("/register").set_json(body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn duplicate_email_is_a_generic_failure() {
        let app = app!();
        for expected in [StatusCode::CREATED, StatusCode::INTERNAL_SERVER_ERROR] {
            let req = test::TestRequest::post()
                .uri("/register")
                .set_json(register_body("a@x.com"))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn login_yields_token_for_registered_subject() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(register_body("a@x.com"))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "email": "a@x.com", "password": "longenough1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let LoginResponse { token } = test::read_body_json(resp).await;
        let claims = Crypto::new(SECRET).unwrap().verify(&token).unwrap();
        assert_eq!(claims.sub.to_string(), created["id"].as_str().unwrap());
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let me: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me, created);
    }

    #[actix_web::test]
    async fn wrong_password_matches_unknown_email() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(register_body("a@x.com"))
            .to_request();
        test::call_service(&app, req).await;
        let mut outcomes = Vec::new();
        for (email, password) in [("a@x.com", "wrongpassword"), ("nobody@x.com", "longenough1")] {
            let req = test::TestRequest::post()
                .uri("/login")
                .set_json(serde_json::json!({ "email": email, "password": password }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            let status = resp.status();
            let body = test::read_body(resp).await;
            outcomes.push((status, body));
        }
        assert_eq!(outcomes[0].0, StatusCode::UNAUTHORIZED);
        assert_eq!(outcomes[0], outcomes[1]);
    }

    /// Store whose backend is always down.
    struct Broken;

    #[async_trait::async_trait]
    impl Credentials for Broken {
        async fn create(&self, _: &str, _: &str, _: &str) -> Result<Member, StoreError> {
            Err(StoreError::Timeout)
        }
        async fn member(&self, _: rsvp_core::ID<Member>) -> Result<Option<Member>, StoreError> {
            Err(StoreError::Timeout)
        }
        async fn lookup(&self, _: &str) -> Result<Option<(Member, String)>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
    }

    #[actix_web::test]
    async fn store_outage_during_login_is_internal() {
        let store: Arc<dyn Credentials> = Arc::new(Broken);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Crypto::new(SECRET).unwrap()))
                .app_data(web::Data::new(Hasher::new(8, 1, 1).unwrap()))
                .app_data(web::Data::from(store))
                .route("/login", web::post().to(login)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "email": "a@x.com", "password": "longenough1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], INTERNAL);
        assert_ne!(body["error"], BAD_CREDENTIALS);
    }
}
