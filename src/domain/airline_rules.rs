use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::api::airline_rules_dto::AirlineRulesDto;
use crate::domain::ids::AirlineId;
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;

/// Cities none of the built-in airlines fly to.
const UNSERVED_BY_ALL: [&str; 20] = [
    "Vancouver",
    "Adelaide",
    "Wellington",
    "Perth",
    "Brisbane",
    "Denver",
    "Phoenix",
    "Orlando",
    "Detroit",
    "Minneapolis",
    "Cleveland",
    "St. Louis",
    "Tampa",
    "Baltimore",
    "Pittsburgh",
    "Charlotte",
    "Austin",
    "San Diego",
    "Portland",
    "Sacramento",
];

/// Service rule of one airline: its hub and the cities it does not fly to.
#[derive(Debug, Clone, PartialEq)]
pub struct AirlineRule {
    pub airline: AirlineId,
    pub hub: String,

    /// Display colour (hex) used by renderers.
    pub color: Option<String>,
    excluded_cities: HashSet<String>,
}

impl AirlineRule {
    pub fn new<I, S>(airline: impl Into<String>, hub: impl Into<String>, excluded_cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            airline: AirlineId::new(airline),
            hub: hub.into(),
            color: None,
            excluded_cities: excluded_cities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// The hub always serves itself; any other city is served unless excluded.
    pub fn serves(&self, city: &str) -> bool {
        city == self.hub || !self.excluded_cities.contains(city)
    }

    pub fn excluded_cities(&self) -> &HashSet<String> {
        &self.excluded_cities
    }
}

/// Immutable lookup table from airline to its [`AirlineRule`].
///
/// Built once at startup, either from [`AirlineRuleSet::builtin`] or from a JSON
/// rule file, and passed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct AirlineRuleSet {
    rules: BTreeMap<AirlineId, AirlineRule>,
}

impl AirlineRuleSet {
    /// Fails with `InvalidRuleSet` on an empty list or a repeated airline name.
    pub fn new(rules: Vec<AirlineRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::InvalidRuleSet("no airlines configured".to_string()));
        }

        let mut map = BTreeMap::new();
        for rule in rules {
            if rule.airline.as_str().is_empty() || rule.hub.is_empty() {
                return Err(Error::InvalidRuleSet(format!("airline '{}' needs a name and a hub", rule.airline)));
            }
            let airline = rule.airline.clone();
            if map.insert(airline.clone(), rule).is_some() {
                return Err(Error::InvalidRuleSet(format!("airline '{}' configured twice", airline)));
            }
        }

        Ok(Self { rules: map })
    }

    /// The three Gulf carriers the network was designed around.
    pub fn builtin() -> Self {
        let qatar_only = ["Lagos"];
        let emirates_only = ["Zanzibar", "Kampala", "Lusaka", "Harare"];
        let etihad_only = ["Rio de Janeiro", "Sao Paulo", "Buenos Aires", "Lagos", "Accra", "Cape Town", "Zanzibar"];
        let latin_america = ["Bogota", "Lima", "Santiago", "Mexico City"];

        let excluded = |extra: &[&str]| -> Vec<String> {
            UNSERVED_BY_ALL.iter().chain(latin_america.iter()).chain(extra.iter()).map(|c| c.to_string()).collect()
        };

        let rules = [
            AirlineRule::new("Qatar Airways", "Doha", excluded(&qatar_only[..])).with_color("#800020"),
            AirlineRule::new("Emirates", "Dubai", excluded(&emirates_only[..])).with_color("#E41B17"),
            AirlineRule::new("Etihad", "Abu Dhabi", excluded(&etihad_only[..])).with_color("#F4C430"),
        ];

        Self { rules: rules.into_iter().map(|r| (r.airline.clone(), r)).collect() }
    }

    pub fn from_dto(dto: AirlineRulesDto) -> Result<Self> {
        let rules = dto
            .airlines
            .into_iter()
            .map(|a| {
                let rule = AirlineRule::new(a.name.trim(), a.hub.trim(), a.excluded_cities.iter().map(|c| c.trim().to_string()));
                match a.color {
                    Some(color) => rule.with_color(color),
                    None => rule,
                }
            })
            .collect();

        Self::new(rules)
    }

    /// Loads a rule set from a JSON rule file.
    pub fn from_json_file(file_path: &str) -> Result<Self> {
        let dto: AirlineRulesDto = parse_json_file(file_path)?;
        let rule_set = Self::from_dto(dto)?;
        log::info!("Loaded {} airline rules from '{}'.", rule_set.len(), file_path);
        Ok(rule_set)
    }

    /// All known airlines in name order.
    pub fn airlines(&self) -> Vec<AirlineId> {
        self.rules.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule(&self, airline: &AirlineId) -> Result<&AirlineRule> {
        self.rules.get(airline).ok_or_else(|| Error::UnknownAirline(airline.to_string()))
    }

    pub fn hub_of(&self, airline: &AirlineId) -> Result<&str> {
        Ok(self.rule(airline)?.hub.as_str())
    }

    pub fn is_served(&self, airline: &AirlineId, city: &str) -> Result<bool> {
        Ok(self.rule(airline)?.serves(city))
    }

    pub fn color(&self, airline: &AirlineId) -> Option<&str> {
        self.rules.get(airline).and_then(|r| r.color.as_deref())
    }

    /// Turns caller supplied airline names into known ids.
    ///
    /// Names are trimmed and matched exactly. The result is deduplicated and sorted.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<AirlineId>> {
        let mut resolved = BTreeSet::new();
        for name in names {
            let airline = AirlineId::new(name.as_ref().trim());
            self.rule(&airline)?;
            resolved.insert(airline);
        }
        Ok(resolved.into_iter().collect())
    }

    pub fn hubs_for(&self, airlines: &[AirlineId]) -> Result<BTreeSet<&str>> {
        airlines.iter().map(|a| self.hub_of(a)).collect()
    }

    pub fn is_hub(&self, city: &str, airlines: &[AirlineId]) -> Result<bool> {
        Ok(self.hubs_for(airlines)?.contains(city))
    }

    /// First airline of `airlines` that flies the direct leg `origin` <-> `dest`, if any.
    pub fn route_airline(&self, origin: &str, dest: &str, airlines: &[AirlineId]) -> Result<Option<AirlineId>> {
        for airline in airlines {
            let rule = self.rule(airline)?;
            let flies = (origin == rule.hub && dest != rule.hub && rule.serves(dest))
                || (dest == rule.hub && origin != rule.hub && rule.serves(origin));
            if flies {
                return Ok(Some(airline.clone()));
            }
        }
        Ok(None)
    }
}

impl Default for AirlineRuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::airline_rules_dto::AirlineRuleDto;

    fn qatar() -> AirlineId {
        AirlineId::new("Qatar Airways")
    }

    #[test]
    fn builtin_hubs_and_exclusions() {
        let rules = AirlineRuleSet::builtin();

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.hub_of(&qatar()).unwrap(), "Doha");
        assert_eq!(rules.hub_of(&AirlineId::new("Emirates")).unwrap(), "Dubai");
        assert_eq!(rules.hub_of(&AirlineId::new("Etihad")).unwrap(), "Abu Dhabi");

        assert!(rules.is_served(&qatar(), "Zanzibar").unwrap());
        assert!(!rules.is_served(&AirlineId::new("Etihad"), "Zanzibar").unwrap());
        assert!(!rules.is_served(&AirlineId::new("Emirates"), "Perth").unwrap());
        assert!(!rules.is_served(&qatar(), "Lagos").unwrap());
        assert!(rules.is_served(&AirlineId::new("Emirates"), "Lagos").unwrap());
        assert_eq!(rules.color(&qatar()), Some("#800020"));
    }

    #[test]
    fn unknown_airline_is_rejected() {
        let rules = AirlineRuleSet::builtin();
        let err = rules.hub_of(&AirlineId::new("Lufthansa")).unwrap_err();
        assert!(matches!(err, Error::UnknownAirline(name) if name == "Lufthansa"));

        let err = rules.resolve(&["Emirates", "Lufthansa"]).unwrap_err();
        assert!(matches!(err, Error::UnknownAirline(_)));
    }

    #[test]
    fn resolve_trims_dedupes_and_sorts() {
        let rules = AirlineRuleSet::builtin();
        let resolved = rules.resolve(&[" Qatar Airways", "Emirates", "Qatar Airways "]).unwrap();
        assert_eq!(resolved, vec![AirlineId::new("Emirates"), qatar()]);
    }

    #[test]
    fn hub_serves_itself_even_if_listed_as_excluded() {
        let rule = AirlineRule::new("Test Air", "Doha", ["Doha", "Paris"]);
        assert!(rule.serves("Doha"));
        assert!(!rule.serves("Paris"));
        assert!(rule.serves("London"));
    }

    #[test]
    fn route_airline_picks_first_matching_carrier() {
        let rules = AirlineRuleSet::builtin();
        let selection = rules.resolve(&["Qatar Airways", "Emirates"]).unwrap();

        assert_eq!(rules.route_airline("Doha", "London", &selection).unwrap(), Some(qatar()));
        assert_eq!(rules.route_airline("London", "Dubai", &selection).unwrap(), Some(AirlineId::new("Emirates")));
        assert_eq!(rules.route_airline("London", "Paris", &selection).unwrap(), None);
        assert!(rules.is_hub("Dubai", &selection).unwrap());
        assert!(!rules.is_hub("Abu Dhabi", &selection).unwrap());
    }

    #[test]
    fn rule_set_from_dto_validates_names() {
        let dto = AirlineRulesDto {
            airlines: vec![
                AirlineRuleDto { name: "Gulf Air".to_string(), hub: "Manama".to_string(), color: None, excluded_cities: vec![" Lima ".to_string()] },
                AirlineRuleDto { name: "Gulf Air".to_string(), hub: "Manama".to_string(), color: None, excluded_cities: vec![] },
            ],
        };
        assert!(matches!(AirlineRuleSet::from_dto(dto), Err(Error::InvalidRuleSet(_))));

        let dto = AirlineRulesDto {
            airlines: vec![AirlineRuleDto { name: "Gulf Air".to_string(), hub: "Manama".to_string(), color: None, excluded_cities: vec![" Lima ".to_string()] }],
        };
        let rules = AirlineRuleSet::from_dto(dto).unwrap();
        assert!(!rules.is_served(&AirlineId::new("Gulf Air"), "Lima").unwrap());

        assert!(matches!(AirlineRuleSet::from_dto(AirlineRulesDto { airlines: vec![] }), Err(Error::InvalidRuleSet(_))));
    }
}
