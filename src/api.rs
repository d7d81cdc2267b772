pub mod airline_rules_dto;
pub mod city_dto;
