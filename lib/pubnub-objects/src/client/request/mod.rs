use http::Method;

use crate::objects::OperationType;

mod path;
pub(crate) use self::path::RequestPath;

mod query;
pub(crate) use self::query::QueryParams;

/// A validated request, ready to be signed and sent.
#[derive(Debug, Clone)]
pub(crate) struct ObjectsRequest {
    operation: OperationType,
    method: Method,
    path: RequestPath,
    query: QueryParams,
    body: Option<Vec<u8>>,
}

impl ObjectsRequest {
    pub(crate) fn new(
        operation: OperationType,
        method: Method,
        path: RequestPath,
        query: QueryParams,
    ) -> Self {
        Self {
            operation,
            method,
            path,
            query,
            body: None,
        }
    }

    pub(crate) fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub(crate) fn operation(&self) -> OperationType {
        self.operation
    }

    pub(crate) fn method(&self) -> &Method {
        &self.method
    }

    pub(crate) fn path(&self) -> &RequestPath {
        &self.path
    }

    pub(crate) fn query(&self) -> &QueryParams {
        &self.query
    }

    pub(crate) fn query_mut(&mut self) -> &mut QueryParams {
        &mut self.query
    }

    pub(crate) fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
