//! Response shaping: converting an action's return value into a transport
//! response.
//!
//! The web shaper renders templates and turns non-empty strings into
//! redirects; the rest shaper encodes JSON and infers 200/201/204 from the
//! verb and the emptiness of the value. Both pass pre-built responses
//! through untouched.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, LOCATION};
use http::{Method, Response, StatusCode};
use http_body_util::Full;
use serde_json::{Map, Value};
use switchboard_core::{DispatchError, DispatchPlan};

use crate::context::RequestContext;
use crate::handler::ActionResult;
use crate::template::{TemplateEngine, TemplateGlobals};

/// Shape a web-variant action result.
///
/// Priority order: pre-built response, redirect (non-empty string), then
/// template render at `<controller>/<resource_chain>.twig` (lowercased)
/// with the result coerced to a key-value mapping.
pub fn shape_web(
    result: ActionResult,
    plan: &DispatchPlan,
    ctx: &RequestContext,
    engine: &dyn TemplateEngine,
) -> Result<Response<Full<Bytes>>, DispatchError> {
    let value = match result {
        ActionResult::Response(response) => return Ok(response),
        ActionResult::Text(url) if !url.is_empty() => return redirect(&url),
        other => other.into_json(),
    };

    let values = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let template = format!("{}/{}.twig", plan.controller, plan.resource_chain).to_lowercase();
    let globals = TemplateGlobals {
        controller: plan.controller.clone(),
        action: plan.resource_chain.to_lowercase(),
        ajax_request: ctx.is_xhr(),
    };

    let html = engine
        .render(&template, &values, &globals)
        .map_err(|source| DispatchError::Render {
            template: template.clone(),
            source,
        })?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(html)))
        .unwrap())
}

/// Shape a rest-variant action result.
///
/// Empty result maps to 204 No Content, a non-empty result to 201 after a
/// POST and 200 otherwise, encoded as JSON.
pub fn shape_rest(result: ActionResult, verb: &Method) -> Response<Full<Bytes>> {
    let empty = result.is_empty();

    let value = match result {
        ActionResult::Response(response) => return response,
        other => other.into_json(),
    };

    if empty {
        return Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Full::new(Bytes::new()))
            .unwrap();
    }

    let status = if *verb == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    json_response(status, &value)
}

/// 302 redirect to the given target. The target comes from handler code,
/// so an invalid header value is surfaced as a handler failure rather than
/// a panic.
fn redirect(url: &str) -> Result<Response<Full<Bytes>>, DispatchError> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, url)
        .body(Full::new(Bytes::new()))
        .map_err(|err| DispatchError::Handler(Box::new(err)))
}

/// Convert a dispatch failure into its mapped status response. The rest
/// variant reports errors as a JSON object, the web variant as plain text.
pub fn error_response(err: &DispatchError, json: bool) -> Response<Full<Bytes>> {
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if json {
        json_response(status, &serde_json::json!({ "error": err.to_string() }))
    } else {
        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Full::new(Bytes::from(err.to_string())))
            .unwrap()
    }
}

fn json_response(status: StatusCode, value: &Value) -> Response<Full<Bytes>> {
    let body = serde_json::to_string(value).unwrap_or_default();

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use switchboard_core::{resolve_web, HandlerError, KeyScheme};

    struct EchoEngine;

    impl TemplateEngine for EchoEngine {
        fn render(
            &self,
            template: &str,
            values: &Map<String, Value>,
            globals: &TemplateGlobals,
        ) -> Result<String, HandlerError> {
            Ok(format!(
                "{template}|{}|{}/{}|ajax={}",
                Value::Object(values.clone()),
                globals.controller,
                globals.action,
                globals.ajax_request
            ))
        }
    }

    fn web_ctx(uri: &str) -> RequestContext {
        let (parts, ()) = http::Request::builder()
            .method("GET")
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        RequestContext::new(parts, Bytes::new())
    }

    fn plan() -> DispatchPlan {
        resolve_web(
            "GET",
            "Users",
            "edit/5",
            &KeyScheme::new("controller.web.", ""),
        )
    }

    #[test]
    fn test_web_prebuilt_response_passes_through() {
        let canned = Response::builder()
            .status(StatusCode::IM_A_TEAPOT)
            .body(Full::new(Bytes::from_static(b"tea")))
            .unwrap();

        let shaped = shape_web(
            ActionResult::Response(canned),
            &plan(),
            &web_ctx("/users/edit/5"),
            &EchoEngine,
        )
        .unwrap();

        assert_eq!(shaped.status(), StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn test_web_nonempty_string_redirects() {
        let shaped = shape_web(
            ActionResult::Text("/login".into()),
            &plan(),
            &web_ctx("/users/edit/5"),
            &EchoEngine,
        )
        .unwrap();

        assert_eq!(shaped.status(), StatusCode::FOUND);
        assert_eq!(shaped.headers()[LOCATION], "/login");
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        use http_body_util::BodyExt;

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_web_renders_lowercased_template_with_globals() {
        let shaped = shape_web(
            ActionResult::Value(json!({"id": 5})),
            &plan(),
            &web_ctx("/users/edit/5"),
            &EchoEngine,
        )
        .unwrap();

        assert_eq!(shaped.status(), StatusCode::OK);
        let body = body_string(shaped).await;
        assert!(body.starts_with("users/edit.twig|"));
        assert!(body.contains(r#"{"id":5}"#));
        assert!(body.contains("users/edit|ajax=false"));
    }

    #[tokio::test]
    async fn test_web_non_mapping_result_renders_empty_values() {
        let shaped = shape_web(
            ActionResult::None,
            &plan(),
            &web_ctx("/users/edit/5"),
            &EchoEngine,
        )
        .unwrap();

        let body = body_string(shaped).await;
        assert!(body.contains("|{}|"));
    }

    #[test]
    fn test_rest_status_inference() {
        let shaped = shape_rest(ActionResult::None, &Method::GET);
        assert_eq!(shaped.status(), StatusCode::NO_CONTENT);

        let shaped = shape_rest(ActionResult::Value(json!({"id": 1})), &Method::POST);
        assert_eq!(shaped.status(), StatusCode::CREATED);

        let shaped = shape_rest(ActionResult::Value(json!([1, 2])), &Method::GET);
        assert_eq!(shaped.status(), StatusCode::OK);
        assert_eq!(shaped.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_rest_prebuilt_response_passes_through() {
        let canned = Response::builder()
            .status(StatusCode::ACCEPTED)
            .body(Full::new(Bytes::new()))
            .unwrap();

        let shaped = shape_rest(ActionResult::Response(canned), &Method::POST);
        assert_eq!(shaped.status(), StatusCode::ACCEPTED);
    }

    #[test]
    fn test_error_response_shapes() {
        let err = DispatchError::MethodNotAllowed { verb: "PUT".into() };

        let text = error_response(&err, false);
        assert_eq!(text.status(), StatusCode::METHOD_NOT_ALLOWED);

        let json = error_response(&err, true);
        assert_eq!(json.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json.headers()[CONTENT_TYPE], "application/json");
    }
}
