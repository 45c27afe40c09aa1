use ferroquote_core::{normalize, ProviderId, Symbol};

struct MappingCase {
    target: ProviderId,
    input: &'static str,
    expected: &'static str,
}

const fn case(target: ProviderId, input: &'static str, expected: &'static str) -> MappingCase {
    MappingCase {
        target,
        input,
        expected,
    }
}

fn documented_cases() -> Vec<MappingCase> {
    use ProviderId::{Alphavantage, Google, Yahoo};

    vec![
        case(Yahoo, ".INX", "^GSPC"),
        case(Yahoo, "SPX", "^GSPC"),
        case(Yahoo, "NDX", "^NDX"),
        case(Yahoo, "RMZ", "^RMZ"),
        case(Yahoo, "RUT", "^RUT"),
        case(Yahoo, "TNX", "^TNX"),
        case(Yahoo, "VIX", "^VIX"),
        case(Yahoo, "NYFANG", "^NYFANG"),
        case(Yahoo, ".DJI", "^DJI"),
        case(Yahoo, ".IXIC", "^IXIC"),
        case(Yahoo, "AAPL", "AAPL"),
        case(Alphavantage, ".INX", "SPX"),
        case(Alphavantage, "^GSPC", "SPX"),
        case(Alphavantage, ".DJI", "DJI"),
        case(Alphavantage, "MSFT", "MSFT"),
        case(Google, "^GSPC", ".INX"),
        case(Google, "SPX", ".INX"),
        case(Google, "^DJI", ".DJI"),
        case(Google, "^IXIC", ".IXIC"),
        case(Google, "DJI", ".DJI"),
        case(Google, "^NDX", "NDX"),
        case(Google, "^RMZ", "RMZ"),
        case(Google, "^RUT", "RUT"),
        case(Google, "^TNX", "TNX"),
        case(Google, "^VIX", "VIX"),
        case(Google, "^NYFANG", "NYFANG"),
        case(Google, "^MERV", "IMV"),
        case(Google, "GOOG", "GOOG"),
    ]
}

fn symbol(value: &str) -> Symbol {
    Symbol::parse(value).expect("valid symbol")
}

#[test]
fn documented_pairs_map_for_every_provider() {
    for case in documented_cases() {
        let mapped = normalize(&symbol(case.input), case.target);
        assert_eq!(
            mapped.as_str(),
            case.expected,
            "{} -> {}",
            case.input,
            case.target
        );
    }
}

#[test]
fn mapping_is_idempotent_for_fixed_index_outputs() {
    for case in documented_cases() {
        let once = normalize(&symbol(case.input), case.target);
        let twice = normalize(&once, case.target);
        assert_eq!(once, twice, "{} -> {} is not stable", case.input, case.target);
    }
}

#[test]
fn sp500_aliases_converge_from_any_notation() {
    let expected = [
        (ProviderId::Yahoo, "^GSPC"),
        (ProviderId::Alphavantage, "SPX"),
        (ProviderId::Google, ".INX"),
    ];

    for alias in [".INX", "SPX", "^GSPC"] {
        for (target, notation) in expected {
            let mapped = normalize(&symbol(alias), target);
            assert_eq!(mapped.as_str(), notation, "{alias} -> {target}");
        }
    }
}

#[test]
fn lowercase_input_is_normalized_before_mapping() {
    assert_eq!(normalize(&symbol("spx"), ProviderId::Yahoo).as_str(), "^GSPC");
    assert_eq!(normalize(&symbol(" vix "), ProviderId::Yahoo).as_str(), "^VIX");
}

#[test]
fn provider_names_parse_into_mapping_targets() {
    for provider in ProviderId::ALL {
        let parsed: ProviderId = provider.as_str().parse().expect("provider name round trips");
        assert_eq!(parsed, provider);
    }
    assert!("bloomberg".parse::<ProviderId>().is_err());
}
