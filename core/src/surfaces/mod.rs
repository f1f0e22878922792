//! Editing surfaces
//!
//! One controller per editor: metadata, icon and audit. Each works in two
//! steps so the remote call can run off the UI thread:
//! `begin` snapshots what the call needs and marks the surface busy, the
//! request's `execute` talks to the gateway, and `finish` applies the
//! outcome back on the UI side.

pub mod audit;
pub mod icon;
pub mod metadata;
pub mod notice;

pub use audit::{AuditDisplay, AuditRequest, AuditSurface, AUDIT_FAILURE};
pub use icon::{IconRequest, IconSurface, ICON_FAILURE};
pub use metadata::{MetadataRequest, MetadataSurface, METADATA_FAILURE};
pub use notice::Notice;

use crate::gateway::{Gateway, GatewayError};
use crate::listing::IconRef;
use crate::types::{AuditIssue, OptimizationResult};

/// A pending gateway call from one of the surfaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceRequest {
    Metadata(MetadataRequest),
    Icon(IconRequest),
    Audit(AuditRequest),
}

impl SurfaceRequest {
    pub async fn execute(self, gateway: &Gateway) -> Completion {
        match self {
            SurfaceRequest::Metadata(r) => r.execute(gateway).await,
            SurfaceRequest::Icon(r) => r.execute(gateway).await,
            SurfaceRequest::Audit(r) => r.execute(gateway).await,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SurfaceRequest::Metadata(_) => "metadata",
            SurfaceRequest::Icon(_) => "icon",
            SurfaceRequest::Audit(_) => "audit",
        }
    }
}

impl From<MetadataRequest> for SurfaceRequest {
    fn from(r: MetadataRequest) -> Self {
        SurfaceRequest::Metadata(r)
    }
}

impl From<IconRequest> for SurfaceRequest {
    fn from(r: IconRequest) -> Self {
        SurfaceRequest::Icon(r)
    }
}

impl From<AuditRequest> for SurfaceRequest {
    fn from(r: AuditRequest) -> Self {
        SurfaceRequest::Audit(r)
    }
}

/// A finished gateway call, with the request that produced it
#[derive(Debug, Clone)]
pub enum Completion {
    Metadata {
        request: MetadataRequest,
        result: Result<OptimizationResult, GatewayError>,
    },
    Icon {
        request: IconRequest,
        result: Result<IconRef, GatewayError>,
    },
    Audit {
        request: AuditRequest,
        result: Result<Vec<AuditIssue>, GatewayError>,
    },
}

impl Completion {
    pub fn is_ok(&self) -> bool {
        match self {
            Completion::Metadata { result, .. } => result.is_ok(),
            Completion::Icon { result, .. } => result.is_ok(),
            Completion::Audit { result, .. } => result.is_ok(),
        }
    }

    pub fn error(&self) -> Option<&GatewayError> {
        match self {
            Completion::Metadata { result, .. } => result.as_ref().err(),
            Completion::Icon { result, .. } => result.as_ref().err(),
            Completion::Audit { result, .. } => result.as_ref().err(),
        }
    }
}
