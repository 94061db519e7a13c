use anyhow::{Result, ensure};
use log::info;

use crate::{
    cli::LocateArgs,
    geo::{Coordinate, ResolutionTier},
    process::load_config,
    table,
};

pub fn execute(args: &LocateArgs) -> Result<()> {
    ensure!(
        args.maint_plant.is_some() || args.functional_loc.is_some() || args.region.is_some(),
        "Provide at least one of --maint-plant, --functional-loc, or --region"
    );
    let config = load_config(args.config.as_deref(), args.resolve_country_names)?;
    let resolver = config.geo_resolver();
    let resolution = resolver.locate(
        args.maint_plant.as_deref(),
        args.functional_loc.as_deref(),
        args.region.as_deref(),
    );
    let headers = ["tier", "latitude", "longitude"].map(String::from);
    table::print_table(&headers, &[locate_row(resolution)]);
    info!("{}", describe_resolution(resolution));
    Ok(())
}

fn locate_row(resolution: Option<(ResolutionTier, Coordinate)>) -> Vec<String> {
    match resolution {
        Some((tier, coordinate)) => vec![
            tier.to_string(),
            coordinate.latitude.to_string(),
            coordinate.longitude.to_string(),
        ],
        None => vec!["unresolved".to_string(), String::new(), String::new()],
    }
}

fn describe_resolution(resolution: Option<(ResolutionTier, Coordinate)>) -> String {
    match resolution {
        Some((tier, _)) => format!("Resolved location via {tier}"),
        None => "No tier matched; location unresolved".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{CountryNameFallback, GeoResolver};

    #[test]
    fn rows_name_the_tier_that_matched() {
        let resolver = GeoResolver::default();
        assert_eq!(
            locate_row(resolver.locate(Some("DE01"), None, None)),
            vec!["country code", "51.1657", "10.4515"]
        );
        assert_eq!(
            locate_row(resolver.locate(None, None, Some("Nordics")))[0],
            "unresolved"
        );
    }

    #[test]
    fn functional_location_needs_name_resolution() {
        let verbatim = GeoResolver::default();
        let by_name = GeoResolver::new(CountryNameFallback::ByCountryName);
        assert_eq!(
            locate_row(verbatim.locate(None, Some("DE-1000"), None))[0],
            "unresolved"
        );
        assert_eq!(
            locate_row(by_name.locate(None, Some("DE-1000"), None))[0],
            "functional location"
        );
    }

    #[test]
    fn log_message_distinguishes_misses() {
        let resolver = GeoResolver::default();
        assert_eq!(
            describe_resolution(resolver.locate(None, None, Some("Europe"))),
            "Resolved location via region"
        );
        assert_eq!(
            describe_resolution(resolver.locate(None, None, Some("Atlantis"))),
            "No tier matched; location unresolved"
        );
    }
}
