use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AirlineRulesDto {
    pub airlines: Vec<AirlineRuleDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlineRuleDto {
    pub name: String,
    pub hub: String,
    pub color: Option<String>,
    #[serde(default)]
    pub excluded_cities: Vec<String>,
}
