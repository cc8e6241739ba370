use crate::Coordinate;
use crate::bounds::AREA_OF_INTEREST;

/// Which channel last legitimately wrote the selected coordinate. A map click
/// keeps precedence until the user explicitly edits the numeric inputs again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Map,
    Manual,
}

/// Reconcile the two competing input channels into one selected coordinate.
///
/// Precedence, in order:
/// 1. a fresh click inside the area of interest wins and flips the source to
///    [`InputSource::Map`]; the click is rounded to 2 decimal places;
/// 2. a click outside the box is dropped without touching anything;
/// 3. with no usable click, `Manual` source means the numeric inputs are
///    authoritative; `Map` source keeps `current` as-is so a stale input box
///    cannot revert a click.
///
/// Safe to call once per render cycle: with identical arguments it returns
/// identical results.
pub fn resolve(
    current: Coordinate,
    map_click: Option<Coordinate>,
    manual: Coordinate,
    last_source: InputSource,
) -> (Coordinate, InputSource) {
    if let Some(click) = map_click {
        if AREA_OF_INTEREST.contains(click) {
            return (click.rounded(), InputSource::Map);
        }
    }
    match last_source {
        InputSource::Manual => (manual, InputSource::Manual),
        InputSource::Map => (current, InputSource::Map),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const CURRENT: Coordinate = Coordinate {
        lat: -3.85,
        lon: -54.84,
    };

    #[test]
    fn in_bounds_click_wins_and_rounds() {
        let click = Coordinate {
            lat: -3.90432,
            lon: -54.89987,
        };
        let (coord, source) = resolve(CURRENT, Some(click), CURRENT, InputSource::Manual);
        assert_eq!(coord, Coordinate { lat: -3.9, lon: -54.9 });
        assert_eq!(source, InputSource::Map);
    }

    #[test]
    fn out_of_bounds_click_is_ignored() {
        let click = Coordinate { lat: 10.0, lon: 10.0 };
        let (coord, source) = resolve(CURRENT, Some(click), CURRENT, InputSource::Manual);
        assert_eq!(coord, CURRENT);
        assert_eq!(source, InputSource::Manual);
    }

    #[test]
    fn manual_source_takes_the_inputs() {
        let manual = Coordinate {
            lat: -4.0,
            lon: -55.0,
        };
        let (coord, source) = resolve(CURRENT, None, manual, InputSource::Manual);
        assert_eq!(coord, manual);
        assert_eq!(source, InputSource::Manual);
    }

    #[test]
    fn map_source_sticks_until_manual_edit() {
        // User typed (-3.85, -54.84), then clicked (-3.90, -54.90). A later
        // render with the unedited input boxes must not revert the click.
        let manual = Coordinate {
            lat: -3.85,
            lon: -54.84,
        };
        let click = Coordinate {
            lat: -3.90,
            lon: -54.90,
        };
        let (coord, source) = resolve(manual, Some(click), manual, InputSource::Manual);
        assert_eq!(coord, Coordinate { lat: -3.90, lon: -54.90 });
        assert_eq!(source, InputSource::Map);

        let (again, source_again) = resolve(coord, None, manual, source);
        assert_eq!(again, coord);
        assert_eq!(source_again, InputSource::Map);
    }

    #[test]
    fn resolve_is_idempotent_without_new_events() {
        let manual = Coordinate {
            lat: -3.50,
            lon: -54.60,
        };
        let first = resolve(CURRENT, None, manual, InputSource::Map);
        let second = resolve(CURRENT, None, manual, InputSource::Map);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn clicks_outside_never_change_state(
            lat in -90.0f64..90.0,
            lon in -180.0f64..180.0,
        ) {
            let click = Coordinate { lat, lon };
            prop_assume!(!AREA_OF_INTEREST.contains(click));
            let (coord, source) = resolve(CURRENT, Some(click), CURRENT, InputSource::Map);
            prop_assert_eq!(coord, CURRENT);
            prop_assert_eq!(source, InputSource::Map);
        }

        #[test]
        fn clicks_inside_always_take_effect(
            lat in -4.39f64..=-3.33,
            lon in -55.2f64..=-54.48,
        ) {
            let click = Coordinate { lat, lon };
            let (coord, source) = resolve(CURRENT, Some(click), CURRENT, InputSource::Manual);
            prop_assert_eq!(coord, click.rounded());
            prop_assert_eq!(source, InputSource::Map);
        }
    }
}
