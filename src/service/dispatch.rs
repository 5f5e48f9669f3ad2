//! Verb-to-method dispatch over the resource registry.

use crate::error::AppError;
use crate::registry::ResourceRegistry;
use crate::resolver::ResourceSelector;
use crate::resource::{QueryParams, RequestSource, ResourceContext, ResourceResult, RestResource};
use crate::response::send_result;
use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

/// Handler method selected by the request verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Index,
    View,
    Create,
    Update,
    Delete,
    Upsert,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Upsert => "upsert",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Action::Index | Action::View => Method::GET,
            Action::Create => Method::POST,
            Action::Update => Method::PATCH,
            Action::Delete => Method::DELETE,
            Action::Upsert => Method::PUT,
        }
    }

    /// Status sent with a raw (non-outcome) result.
    pub fn default_status(&self) -> StatusCode {
        match self {
            Action::Create => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }

    async fn invoke(&self, handler: &mut dyn RestResource, ctx: &ResourceContext) -> ResourceResult {
        match self {
            Action::Index => handler.index(ctx).await,
            Action::View => handler.view(ctx).await,
            Action::Create => handler.create(ctx).await,
            Action::Update => handler.update(ctx).await,
            Action::Delete => handler.delete(ctx).await,
            Action::Upsert => handler.upsert(ctx).await,
        }
    }
}

/// Everything the dispatcher needs from one HTTP request.
#[derive(Clone, Debug)]
pub struct ResourceRequest {
    pub selector: ResourceSelector,
    pub id: Option<String>,
    pub query: QueryParams,
    pub body: Bytes,
}

pub struct ResourceDispatcher;

impl ResourceDispatcher {
    /// Resolve the resource, build it (binding input when it takes any), run the method for
    /// `action`, and translate the result.
    pub async fn dispatch(
        registry: &ResourceRegistry,
        action: Action,
        request: ResourceRequest,
    ) -> Result<Response, AppError> {
        let span = tracing::debug_span!(
            "dispatch",
            request_id = %Uuid::new_v4(),
            method = %action.method(),
            action = action.as_str(),
            resource = %request.selector.name,
        );
        async move {
            let ResourceRequest {
                selector,
                id,
                query,
                body,
            } = request;
            let registered = selector.resolve(registry)?;
            tracing::debug!(path = %registered.path, accepts_input = registered.accepts_input, "resolved resource");

            let source = RequestSource {
                body: &body,
                query: &query,
            };
            let mut handler = registered.instantiate(registry.fillers(), source)?;
            let ctx = ResourceContext { id, query };
            let result = action.invoke(handler.as_mut(), &ctx).await;
            send_result(result, action.default_status())
        }
        .instrument(span)
        .await
    }
}
