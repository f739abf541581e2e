//! Income sources
//!
//! Each income category computes a monthly figure from its own fields. The
//! stored form of an income record carries no type tag: a record is
//! recognised by which fields it has, tried in [`IncomeKind::DECODE_ORDER`].
//! Field names overlap between categories (`rate` appears in three), so that
//! order is part of the file format.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::quantity::{Integer, Money, Number, Percentage, Quantity, QuantityKind};

/// Loosely-typed field name → value mapping used while decoding
pub type FieldBag = Map<String, Value>;

/// Weeks in a year, used to annualise weekly wages
const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;
const OVERTIME_MULTIPLIER: f64 = 1.5;

/// Rules that income computations depend on but records do not store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayRules {
    /// Weekly hours after which wages are paid at time-and-a-half
    pub overtime_threshold: f64,
    /// Fraction of gross pay taken home; applies to wages and salary
    pub net_pay_fraction: f64,
}

impl Default for PayRules {
    fn default() -> Self {
        Self {
            overtime_threshold: 40.0,
            net_pay_fraction: 0.75,
        }
    }
}

/// Errors decoding stored income records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IncomeDecodeError {
    #[error("unrecognized income record \"{name}\"")]
    Unrecognized { name: String },

    #[error("income record \"{name}\" is not an object")]
    NotAnObject { name: String },
}

/// Paid a fixed hourly rate, with overtime past the weekly threshold
///
/// At $9 an hour for 50 hours a week with a 40 hour threshold, a week pays
/// $360 plus $135 overtime: $25,740 a year gross, or $2,145 a month, before
/// the net pay fraction is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Wages {
    /// Rate paid per hour
    pub rate: Money,
    /// Average hours worked per week
    pub hours: Number,
}

impl Wages {
    pub fn monthly_income(&self, rules: &PayRules) -> Money {
        let hours = self.hours.value();
        let normal_hours = hours.min(rules.overtime_threshold);
        let overtime_hours = (hours - rules.overtime_threshold).max(0.0);
        let weekly = self.rate * normal_hours + self.rate * (OVERTIME_MULTIPLIER * overtime_hours);
        weekly * (rules.net_pay_fraction * WEEKS_PER_YEAR / MONTHS_PER_YEAR)
    }
}

/// A fixed amount per year paid over regular intervals
#[derive(Debug, Clone, PartialEq)]
pub struct Salary {
    /// Annual salary
    pub salary: Money,
}

impl Salary {
    pub fn monthly_income(&self, rules: &PayRules) -> Money {
        self.salary * rules.net_pay_fraction / MONTHS_PER_YEAR
    }
}

/// A fixed amount per item sold or task completed
#[derive(Debug, Clone, PartialEq)]
pub struct Sales {
    /// Price paid per item
    pub rate: Money,
    /// Average items sold per month
    pub items: Integer,
}

impl Sales {
    pub fn monthly_income(&self) -> Money {
        self.rate * self.items.value()
    }
}

/// A share of the value of each sale
///
/// A realtor on 6% who sold one home for $25,000 and one for $75,000 this
/// month makes $6,000.
#[derive(Debug, Clone, PartialEq)]
pub struct Commissions {
    pub rate: Percentage,
    /// Value of each sale
    pub volume: Vec<Money>,
}

impl Commissions {
    pub fn monthly_income(&self) -> Money {
        self.rate.of(self.volume.iter().copied().sum())
    }
}

/// A flat monthly amount
#[derive(Debug, Clone, PartialEq)]
pub struct Supplemental {
    pub money: Money,
}

/// A source of monthly income
#[derive(Debug, Clone, PartialEq)]
pub enum Income {
    Wages(Wages),
    Salary(Salary),
    Sales(Sales),
    Commissions(Commissions),
    Supplemental(Supplemental),
}

impl Income {
    pub fn kind(&self) -> IncomeKind {
        match self {
            Self::Wages(_) => IncomeKind::Wages,
            Self::Salary(_) => IncomeKind::Salary,
            Self::Sales(_) => IncomeKind::Sales,
            Self::Commissions(_) => IncomeKind::Commissions,
            Self::Supplemental(_) => IncomeKind::Supplemental,
        }
    }

    /// Compute the monthly income of this source
    pub fn monthly_income(&self, rules: &PayRules) -> Money {
        match self {
            Self::Wages(wages) => wages.monthly_income(rules),
            Self::Salary(salary) => salary.monthly_income(rules),
            Self::Sales(sales) => sales.monthly_income(),
            Self::Commissions(commissions) => commissions.monthly_income(),
            Self::Supplemental(supplemental) => supplemental.money,
        }
    }

    /// The stored fields of this record, and only those
    pub fn to_fields(&self) -> FieldBag {
        let mut fields = FieldBag::new();
        match self {
            Self::Wages(wages) => {
                fields.insert("rate".into(), wages.rate.to_stored());
                fields.insert("hours".into(), wages.hours.to_stored());
            }
            Self::Salary(salary) => {
                fields.insert("salary".into(), salary.salary.to_stored());
            }
            Self::Sales(sales) => {
                fields.insert("rate".into(), sales.rate.to_stored());
                fields.insert("items".into(), sales.items.to_stored());
            }
            Self::Commissions(commissions) => {
                fields.insert("rate".into(), commissions.rate.to_stored());
                let volume = commissions.volume.iter().map(Quantity::to_stored).collect();
                fields.insert("volume".into(), Value::Array(volume));
            }
            Self::Supplemental(supplemental) => {
                fields.insert("money".into(), supplemental.money.to_stored());
            }
        }
        fields
    }

    /// Recognise a stored record by the first kind whose fields all match
    pub fn from_fields(name: &str, fields: &FieldBag) -> Result<Self, IncomeDecodeError> {
        IncomeKind::DECODE_ORDER
            .iter()
            .find_map(|kind| kind.match_fields(fields))
            .ok_or_else(|| IncomeDecodeError::Unrecognized {
                name: name.to_string(),
            })
    }
}

impl Serialize for Income {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_fields().serialize(serializer)
    }
}

/// The closed set of income categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomeKind {
    Wages,
    Salary,
    Sales,
    Commissions,
    Supplemental,
}

/// Lower bound a captured field must meet
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LowerBound {
    Value(f64),
    /// The configured minimum wage
    MinimumWage,
}

impl LowerBound {
    pub fn resolve(&self, minimum_wage: f64) -> f64 {
        match self {
            Self::Value(value) => *value,
            Self::MinimumWage => minimum_wage,
        }
    }
}

/// One input field of an income category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Stored field name
    pub name: &'static str,
    pub prompt: &'static str,
    pub kind: QuantityKind,
    pub lower_bound: LowerBound,
    /// Captured as a non-empty list
    pub repeated: bool,
}

const fn field(
    name: &'static str,
    prompt: &'static str,
    kind: QuantityKind,
    lower_bound: LowerBound,
) -> FieldSpec {
    FieldSpec {
        name,
        prompt,
        kind,
        lower_bound,
        repeated: false,
    }
}

const WAGES_FIELDS: &[FieldSpec] = &[
    field("rate", "Hourly Rate", QuantityKind::Money, LowerBound::MinimumWage),
    field("hours", "Average Hours Per Week", QuantityKind::Number, LowerBound::Value(1.0)),
];

const SALARY_FIELDS: &[FieldSpec] = &[field(
    "salary",
    "Salary",
    QuantityKind::Money,
    LowerBound::Value(0.01),
)];

const SALES_FIELDS: &[FieldSpec] = &[
    field("rate", "Selling Price", QuantityKind::Money, LowerBound::Value(0.01)),
    field("items", "Average Number of Items Sold", QuantityKind::Integer, LowerBound::Value(1.0)),
];

const COMMISSIONS_FIELDS: &[FieldSpec] = &[
    field("rate", "Percentage", QuantityKind::Percentage, LowerBound::Value(0.0)),
    FieldSpec {
        name: "volume",
        prompt: "Item",
        kind: QuantityKind::Money,
        lower_bound: LowerBound::Value(0.01),
        repeated: true,
    },
];

const SUPPLEMENTAL_FIELDS: &[FieldSpec] = &[field(
    "money",
    "Monthly Amount",
    QuantityKind::Money,
    LowerBound::Value(0.01),
)];

impl IncomeKind {
    /// Every kind, in menu (alphabetical) order
    pub const ALL: [IncomeKind; 5] = [
        Self::Commissions,
        Self::Sales,
        Self::Salary,
        Self::Supplemental,
        Self::Wages,
    ];

    /// Shape-matching priority for stored records
    pub const DECODE_ORDER: [IncomeKind; 5] = [
        Self::Wages,
        Self::Salary,
        Self::Sales,
        Self::Commissions,
        Self::Supplemental,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Wages => "Wages",
            Self::Salary => "Salary",
            Self::Sales => "Sales",
            Self::Commissions => "Commissions",
            Self::Supplemental => "Supplemental",
        }
    }

    /// Input fields in capture order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Wages => WAGES_FIELDS,
            Self::Salary => SALARY_FIELDS,
            Self::Sales => SALES_FIELDS,
            Self::Commissions => COMMISSIONS_FIELDS,
            Self::Supplemental => SUPPLEMENTAL_FIELDS,
        }
    }

    /// Build this kind from a field bag if all its fields are present and well-typed
    pub fn match_fields(&self, fields: &FieldBag) -> Option<Income> {
        match self {
            Self::Wages => Some(Income::Wages(Wages {
                rate: stored(fields, "rate")?,
                hours: stored(fields, "hours")?,
            })),
            Self::Salary => Some(Income::Salary(Salary {
                salary: stored(fields, "salary")?,
            })),
            Self::Sales => Some(Income::Sales(Sales {
                rate: stored(fields, "rate")?,
                items: stored(fields, "items")?,
            })),
            Self::Commissions => {
                let rate = stored(fields, "rate")?;
                let volume = fields
                    .get("volume")?
                    .as_array()?
                    .iter()
                    .map(|value| Money::from_stored(value).ok())
                    .collect::<Option<Vec<_>>>()?;
                if volume.is_empty() {
                    return None;
                }
                Some(Income::Commissions(Commissions { rate, volume }))
            }
            Self::Supplemental => Some(Income::Supplemental(Supplemental {
                money: stored(fields, "money")?,
            })),
        }
    }
}

impl fmt::Display for IncomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn stored<Q: Quantity>(fields: &FieldBag, name: &str) -> Option<Q> {
    fields.get(name).and_then(|value| Q::from_stored(value).ok())
}

/// Named income sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeList {
    entries: BTreeMap<String, Income>,
}

impl IncomeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named source, returning the replaced one
    pub fn insert(&mut self, name: impl Into<String>, income: Income) -> Option<Income> {
        self.entries.insert(name.into(), income)
    }

    pub fn get(&self, name: &str) -> Option<&Income> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Income> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Income)> {
        self.entries.iter().map(|(name, income)| (name.as_str(), income))
    }

    pub fn sorted_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Monthly income of each source, in name order
    pub fn monthly_incomes<'a>(
        &'a self,
        rules: &'a PayRules,
    ) -> impl Iterator<Item = (&'a str, Money)> + 'a {
        self.iter()
            .map(move |(name, income)| (name, income.monthly_income(rules)))
    }

    /// Total monthly income; zero when empty
    pub fn sum(&self, rules: &PayRules) -> Money {
        self.entries
            .values()
            .map(|income| income.monthly_income(rules))
            .sum()
    }

    /// Decode stored records, failing the whole list on the first bad entry
    pub fn decode(records: &Map<String, Value>) -> Result<Self, IncomeDecodeError> {
        let mut list = Self::new();
        for (name, record) in records {
            let fields = record
                .as_object()
                .ok_or_else(|| IncomeDecodeError::NotAnObject { name: name.clone() })?;
            list.insert(name.clone(), Income::from_fields(name, fields)?);
        }
        Ok(list)
    }
}

impl Serialize for IncomeList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IncomeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Map::<String, Value>::deserialize(deserializer)?;
        Self::decode(&records).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn money(value: f64) -> Money {
        Money::from_f64(value)
    }

    fn bag(value: Value) -> FieldBag {
        value.as_object().cloned().unwrap()
    }

    fn one_of_each() -> IncomeList {
        let mut list = IncomeList::new();
        list.insert(
            "Diner",
            Income::Wages(Wages {
                rate: money(10.0),
                hours: Number::from_f64(50.0),
            }),
        );
        list.insert("University", Income::Salary(Salary { salary: money(48_000.0) }));
        list.insert(
            "Lemonade",
            Income::Sales(Sales {
                rate: money(1.0),
                items: Integer::from_i64(50),
            }),
        );
        list.insert(
            "Realty",
            Income::Commissions(Commissions {
                rate: Percentage::from_value(0.06),
                volume: vec![money(25_000.0), money(75_000.0)],
            }),
        );
        list.insert("Allowance", Income::Supplemental(Supplemental { money: money(200.0) }));
        list
    }

    #[test]
    fn test_wages_with_overtime() {
        let wages = Wages {
            rate: money(10.0),
            hours: Number::from_f64(50.0),
        };
        assert_eq!(wages.monthly_income(&PayRules::default()).to_string(), "$1,787.50");
    }

    #[test]
    fn test_wages_without_overtime() {
        let wages = Wages {
            rate: money(9.0),
            hours: Number::from_f64(30.0),
        };
        let rules = PayRules {
            net_pay_fraction: 1.0,
            ..PayRules::default()
        };
        // 52 * 270 / 12
        assert_eq!(wages.monthly_income(&rules).to_string(), "$1,170.00");
    }

    #[test]
    fn test_wages_respects_overtime_threshold() {
        let wages = Wages {
            rate: money(9.0),
            hours: Number::from_f64(50.0),
        };
        let rules = PayRules {
            overtime_threshold: 40.0,
            net_pay_fraction: 1.0,
        };
        assert_eq!(wages.monthly_income(&rules).to_string(), "$2,145.00");
    }

    #[test]
    fn test_salary() {
        let salary = Salary { salary: money(48_000.0) };
        assert_eq!(salary.monthly_income(&PayRules::default()).value(), 3000.0);
    }

    #[test]
    fn test_sales() {
        let sales = Sales {
            rate: money(1.25),
            items: Integer::from_i64(40),
        };
        assert_eq!(sales.monthly_income().value(), 50.0);
    }

    #[test]
    fn test_commissions() {
        let commissions = Commissions {
            rate: Percentage::parse("6%").unwrap(),
            volume: vec![money(25_000.0), money(75_000.0)],
        };
        assert_eq!(commissions.monthly_income().to_string(), "$6,000.00");
    }

    #[test]
    fn test_dispatch_covers_every_kind() {
        let list = one_of_each();
        let kinds: Vec<IncomeKind> = list.iter().map(|(_, income)| income.kind()).collect();
        for kind in IncomeKind::ALL {
            assert!(kinds.contains(&kind), "{} missing", kind);
            assert!(!kind.fields().is_empty());
        }
        assert_eq!(IncomeKind::ALL.len(), IncomeKind::DECODE_ORDER.len());
    }

    #[test]
    fn test_supplemental_is_flat() {
        let income = Income::Supplemental(Supplemental { money: money(125.0) });
        assert_eq!(income.monthly_income(&PayRules::default()).value(), 125.0);
    }

    #[test]
    fn test_empty_list_sums_to_zero() {
        assert!(IncomeList::new().sum(&PayRules::default()).is_zero());
    }

    #[test]
    fn test_sum() {
        let list = one_of_each();
        // 1787.50 + 3000 + 50 + 6000 + 200
        assert_eq!(list.sum(&PayRules::default()).to_string(), "$11,037.50");
    }

    #[test]
    fn test_sorted_names() {
        assert_eq!(
            one_of_each().sorted_names(),
            vec!["Allowance", "Diner", "Lemonade", "Realty", "University"]
        );
    }

    #[test]
    fn test_monthly_incomes_in_name_order() {
        let list = one_of_each();
        let rules = PayRules::default();
        let incomes: Vec<(&str, Money)> = list.monthly_incomes(&rules).collect();
        assert_eq!(incomes[0], ("Allowance", money(200.0)));
        assert_eq!(incomes[4].0, "University");
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut list = IncomeList::new();
        list.insert("Job", Income::Supplemental(Supplemental { money: money(1.0) }));
        let previous = list.insert("Job", Income::Salary(Salary { salary: money(12.0) }));
        assert!(previous.is_some());
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("Job").unwrap().kind(), IncomeKind::Salary);
    }

    #[test]
    fn test_encode_writes_only_variant_fields() {
        let sales = Income::Sales(Sales {
            rate: money(2.5),
            items: Integer::from_i64(10),
        });
        assert_eq!(serde_json::to_value(&sales).unwrap(), json!({"rate": 2.5, "items": 10}));

        let commissions = Income::Commissions(Commissions {
            rate: Percentage::from_value(0.06),
            volume: vec![money(100.0)],
        });
        assert_eq!(
            serde_json::to_value(&commissions).unwrap(),
            json!({"rate": 0.06, "volume": [100.0]})
        );
    }

    #[test]
    fn test_decode_priority_prefers_wages() {
        let fields = bag(json!({"rate": 10.0, "hours": 40, "money": 5.0}));
        let income = Income::from_fields("Job", &fields).unwrap();
        assert_eq!(income.kind(), IncomeKind::Wages);
    }

    #[test]
    fn test_decode_each_shape() {
        let cases = [
            (json!({"salary": 50000}), IncomeKind::Salary),
            (json!({"rate": 1.0, "items": 50}), IncomeKind::Sales),
            (json!({"rate": 0.06, "volume": [25000, 75000]}), IncomeKind::Commissions),
            (json!({"money": 200}), IncomeKind::Supplemental),
        ];
        for (record, expected) in cases {
            let income = Income::from_fields("x", &bag(record)).unwrap();
            assert_eq!(income.kind(), expected);
        }
    }

    #[test]
    fn test_decode_skips_ill_typed_shapes() {
        // rate is not a number, so neither Wages nor Sales match
        let fields = bag(json!({"rate": "ten", "hours": 40, "money": 5.0}));
        let income = Income::from_fields("x", &fields).unwrap();
        assert_eq!(income.kind(), IncomeKind::Supplemental);
    }

    #[test]
    fn test_decode_commissions_requires_volume() {
        let fields = bag(json!({"rate": 0.06, "volume": []}));
        assert_eq!(
            Income::from_fields("Realty", &fields).unwrap_err(),
            IncomeDecodeError::Unrecognized {
                name: "Realty".into()
            }
        );
    }

    #[test]
    fn test_decode_unrecognized_aborts_list() {
        let records = bag(json!({
            "Good": {"money": 10},
            "Bad": {"bonus": 10}
        }));
        let err = IncomeList::decode(&records).unwrap_err();
        assert_eq!(err.to_string(), "unrecognized income record \"Bad\"");
    }

    #[test]
    fn test_decode_rejects_non_object_record() {
        let records = bag(json!({"Odd": 12}));
        assert!(matches!(
            IncomeList::decode(&records),
            Err(IncomeDecodeError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let list = one_of_each();
        let json = serde_json::to_string(&list).unwrap();
        let decoded: IncomeList = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, list);
        let rules = PayRules::default();
        assert_eq!(decoded.sum(&rules), list.sum(&rules));
    }

    #[test]
    fn test_deserialize_reports_unrecognized_record() {
        let result: Result<IncomeList, _> = serde_json::from_str(r#"{"Gift": {"amount": 5}}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unrecognized income record \"Gift\""));
    }
}
