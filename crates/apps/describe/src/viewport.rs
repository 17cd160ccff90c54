use geoview::{BoundingBox, BoundsError, MapWidget, MercatorViewport};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ViewportArgError {
    #[error("expected west,south,east,north but got {0} values")]
    Arity(usize),

    #[error("'{value}' is not a number")]
    Number { value: String },

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// The region a command-line run describes.
#[derive(Debug, Clone)]
pub enum CliViewport {
    /// An explicit box from `--bbox`.
    Fixed(BoundingBox),
    /// A simulated map view from `--lat/--lon/--zoom/--width/--height`.
    Mercator(MercatorViewport),
}

impl MapWidget for CliViewport {
    fn viewport_bounds(&self) -> Result<BoundingBox, BoundsError> {
        match self {
            Self::Fixed(bbox) => Ok(*bbox),
            Self::Mercator(view) => view.bounds(),
        }
    }
}

/// Parses `west,south,east,north`, the same order as the STAC `bbox` field.
pub fn parse_bbox(raw: &str) -> Result<BoundingBox, ViewportArgError> {
    let parts = raw
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>().map_err(|_| ViewportArgError::Number {
                value: part.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let [west, south, east, north] = parts[..] else {
        return Err(ViewportArgError::Arity(parts.len()));
    };
    Ok(BoundingBox::new(north, south, east, west)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_west_south_east_north() {
        let bbox = parse_bbox("-0.12, 51.49, -0.06, 51.52").unwrap();
        assert_eq!(bbox, BoundingBox::new(51.52, 51.49, -0.06, -0.12).unwrap());
    }

    #[test]
    fn rejects_wrong_arity() {
        assert_eq!(parse_bbox("1,2,3"), Err(ViewportArgError::Arity(3)));
        assert_eq!(parse_bbox("1,2,3,4,5"), Err(ViewportArgError::Arity(5)));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(
            parse_bbox("a,1,2,3"),
            Err(ViewportArgError::Number {
                value: "a".to_string()
            })
        );
    }

    #[test]
    fn rejects_invalid_bounds() {
        let err = parse_bbox("0,10,1,5").unwrap_err();
        assert!(matches!(err, ViewportArgError::Bounds(BoundsError::Inverted { .. })));
        let err = parse_bbox("0,0,1,91").unwrap_err();
        assert!(matches!(
            err,
            ViewportArgError::Bounds(BoundsError::LatitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn fixed_viewport_reports_its_box() {
        let bbox = BoundingBox::new(1.0, -1.0, 2.0, -2.0).unwrap();
        assert_eq!(CliViewport::Fixed(bbox).viewport_bounds().unwrap(), bbox);
    }

    #[test]
    fn mercator_viewport_surrounds_its_center() {
        let view = MercatorViewport::new(51.505, -0.09, 13.0, 800, 600).unwrap();
        let bbox = CliViewport::Mercator(view).viewport_bounds().unwrap();
        assert!(bbox.contains(51.505, -0.09));
        assert!(bbox.span_lon() < 0.2);
    }
}
