use std::rc::Rc;

use geoview::BoundingBox;

use crate::error::TransportError;
use crate::outcome::AnalysisResult;

/// Remote analysis service seen from the controller.
///
/// `Ok` carries a decoded service answer (`Description` or `ApplicationError`);
/// any failure to get one is a [`TransportError`]. Futures are not required to
/// be `Send`: the controller runs on a single UI-bound executor.
#[allow(async_fn_in_trait)]
pub trait AnalysisService {
    async fn describe(&self, bbox: &BoundingBox) -> Result<AnalysisResult, TransportError>;
}

impl<S: AnalysisService> AnalysisService for Rc<S> {
    async fn describe(&self, bbox: &BoundingBox) -> Result<AnalysisResult, TransportError> {
        (**self).describe(bbox).await
    }
}

impl<S: AnalysisService> AnalysisService for &S {
    async fn describe(&self, bbox: &BoundingBox) -> Result<AnalysisResult, TransportError> {
        (**self).describe(bbox).await
    }
}
