//! Tests for the console front end.

#[cfg(test)]
mod prompt_tests {
    use er_core::Severity;

    use crate::prompt::{Prompter, parse_coordinates};

    fn session(script: &str) -> (Vec<er_core::Incident>, String) {
        let mut prompter = Prompter::new(script.as_bytes(), Vec::new());
        let incidents = prompter.read_incidents().unwrap();
        let output = String::from_utf8(prompter.into_output()).unwrap();
        (incidents, output)
    }

    #[test]
    fn single_incident_session() {
        let (incidents, output) = session("Connaught Place\n1\n28.6300 77.2170\n0\n");
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].place, "Connaught Place");
        assert_eq!(incidents[0].severity, Severity::Fire);
        assert!((incidents[0].location.lat - 28.63).abs() < 1e-9);
        assert!((incidents[0].location.lon - 77.217).abs() < 1e-9);
        assert!(output.contains("Entered place: Connaught Place"));
        assert!(output.contains("Any Other Assistance Required: 1/0"));
    }

    #[test]
    fn menu_lists_codes_in_dispatch_order() {
        let (_, output) = session("Saket\n3\n28.52 77.21\n0\n");
        assert!(output.contains("Enter Emergency: \n1. Fire\n2. Medical\n3. Crime\n4. Other\n"));
    }

    #[test]
    fn several_incidents_until_zero() {
        let (incidents, _) = session(
            "Karol Bagh\n2\n28.65 77.19\n1\nSaket\n3\n28.52 77.21\n1\nPark\n4\n28.60 77.20\n0\n",
        );
        let severities: Vec<Severity> = incidents.iter().map(|i| i.severity).collect();
        assert_eq!(severities, [Severity::Medical, Severity::Crime, Severity::Other]);
    }

    #[test]
    fn invalid_code_restarts_from_place() {
        let (incidents, output) = session("Typo\n9\nLajpat Nagar\nx\nSaket\n3\n28.52 77.21\n0\n");
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].place, "Saket");
        assert_eq!(output.matches("Enter valid code!!!!").count(), 2);
        assert_eq!(output.matches("Enter the place: ").count(), 3);
    }

    #[test]
    fn bad_coordinates_reprompt() {
        let (incidents, output) = session("Saket\n3\nnorth\n28.52\n28.52, 77.21\n0\n");
        assert_eq!(incidents.len(), 1);
        assert_eq!(output.matches("Enter the coordinates: ").count(), 3);
    }

    #[test]
    fn end_of_input_keeps_completed_incidents() {
        let (incidents, _) = session("Saket\n3\n28.52 77.21\n1\nHalf entered\n");
        assert_eq!(incidents.len(), 1);

        let (empty, _) = session("");
        assert!(empty.is_empty());
    }

    #[test]
    fn non_numeric_answer_ends_session() {
        let (incidents, _) = session("Saket\n3\n28.52 77.21\nno\nIgnored\n1\n1 1\n0\n");
        assert_eq!(incidents.len(), 1);
    }

    #[test]
    fn coordinates_parse() {
        let p = parse_coordinates("  28.5839\t77.2189 ").unwrap();
        assert_eq!((p.lat, p.lon), (28.5839, 77.2189));
        assert!(parse_coordinates("28.5,77.2").is_some());
        assert!(parse_coordinates("28.5").is_none());
        assert!(parse_coordinates("28.5 77.2 3").is_none());
        assert!(parse_coordinates("NaN 77.2").is_none());
    }
}

#[cfg(test)]
mod cli_tests {
    use crate::{build_config, cli};

    #[test]
    fn flags_override_defaults() {
        let matches = cli()
            .try_get_matches_from(["console", "--seed", "9", "--timeout-ms", "250", "--osrm-url", "http://localhost:5000"])
            .unwrap();
        let config = build_config(&matches);
        assert_eq!(config.seed, 9);
        assert_eq!(config.route_timeout_ms, 250);
        assert_eq!(config.osrm_base_url, "http://localhost:5000");
        assert_eq!(config.osrm_profile, "driving");
    }

    #[test]
    fn offline_flag() {
        let matches = cli().try_get_matches_from(["console", "--offline"]).unwrap();
        assert!(matches.get_flag("offline"));
    }

    #[test]
    fn rejects_non_numeric_seed() {
        assert!(cli().try_get_matches_from(["console", "--seed", "abc"]).is_err());
    }
}
