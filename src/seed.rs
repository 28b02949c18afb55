//! Demo data: two blueprints and a contract in every status

use chrono::{DateTime, Duration, Utc};
use contract_types::{
    Blueprint, Contract, ContractStatus, FieldDefinition, FieldType, FieldValue, ValueMap,
};

pub const NDA_BLUEPRINT_ID: &str = "bp-nda";
pub const EMPLOYMENT_BLUEPRINT_ID: &str = "bp-employment";

mod nda {
    pub const DISCLOSING_PARTY: &str = "nda-disclosing-party";
    pub const RECEIVING_PARTY: &str = "nda-receiving-party";
    pub const EFFECTIVE_DATE: &str = "nda-effective-date";
    pub const NON_SOLICIT: &str = "nda-non-solicit";
    pub const SIG_DISCLOSING: &str = "nda-sig-disclosing";
    pub const SIG_RECEIVING: &str = "nda-sig-receiving";
}

mod employment {
    pub const EMPLOYEE_NAME: &str = "emp-employee-name";
    pub const ROLE_TITLE: &str = "emp-role-title";
    pub const START_DATE: &str = "emp-start-date";
    pub const SALARY: &str = "emp-salary";
    pub const REMOTE: &str = "emp-remote";
    pub const SIG_EMPLOYEE: &str = "emp-sig-employee";
}

#[derive(Debug, Clone)]
pub struct DemoData {
    pub blueprints: Vec<Blueprint>,
    pub contracts: Vec<Contract>,
}

pub fn demo_data() -> DemoData {
    demo_data_at(Utc::now())
}

/// Demo data with timestamps relative to `now`
pub fn demo_data_at(now: DateTime<Utc>) -> DemoData {
    let nda = nda_blueprint(now);
    let employment = employment_blueprint(now);

    let contracts = vec![
        contract(
            "contract-nda-acme",
            &nda,
            "NDA with Acme Corp",
            ContractStatus::Signed,
            &[
                (nda::DISCLOSING_PARTY, FieldValue::text("My Company Inc.")),
                (nda::RECEIVING_PARTY, FieldValue::text("Acme Corp")),
                (nda::EFFECTIVE_DATE, FieldValue::text("2023-10-01")),
                (nda::NON_SOLICIT, FieldValue::Flag(true)),
                (nda::SIG_DISCLOSING, FieldValue::text("John CEO")),
                (nda::SIG_RECEIVING, FieldValue::text("Alice Acme")),
            ],
            now - Duration::days(10),
            now,
        ),
        contract(
            "contract-offer-jane",
            &employment,
            "Offer Letter - Jane Doe",
            ContractStatus::Sent,
            &[
                (employment::EMPLOYEE_NAME, FieldValue::text("Jane Doe")),
                (employment::ROLE_TITLE, FieldValue::text("Senior Engineer")),
                (employment::START_DATE, FieldValue::text("2023-11-15")),
                (employment::SALARY, FieldValue::text("$140,000")),
                (employment::REMOTE, FieldValue::Flag(true)),
            ],
            now - Duration::days(2),
            now,
        ),
        contract(
            "contract-nda-startupx",
            &nda,
            "NDA with StartupX",
            ContractStatus::Created,
            &[
                (nda::DISCLOSING_PARTY, FieldValue::text("My Company Inc.")),
                (nda::RECEIVING_PARTY, FieldValue::text("StartupX")),
            ],
            now,
            now,
        ),
        contract(
            "contract-offer-bob",
            &employment,
            "Offer Letter - Bob Smith",
            ContractStatus::Approved,
            &[
                (employment::EMPLOYEE_NAME, FieldValue::text("Bob Smith")),
                (employment::ROLE_TITLE, FieldValue::text("Product Manager")),
                (employment::START_DATE, FieldValue::text("2023-12-01")),
                (employment::SALARY, FieldValue::text("$130,000")),
                (employment::REMOTE, FieldValue::Flag(false)),
            ],
            now - Duration::days(5),
            now,
        ),
        contract(
            "contract-nda-vendory",
            &nda,
            "NDA with VendorY (Revoked)",
            ContractStatus::Revoked,
            &[
                (nda::DISCLOSING_PARTY, FieldValue::text("My Company Inc.")),
                (nda::RECEIVING_PARTY, FieldValue::text("VendorY")),
                (nda::EFFECTIVE_DATE, FieldValue::text("2023-09-01")),
            ],
            now - Duration::days(20),
            now,
        ),
        contract(
            "contract-alice-locked",
            &employment,
            "Contract - Alice Wonder (Locked)",
            ContractStatus::Locked,
            &[
                (employment::EMPLOYEE_NAME, FieldValue::text("Alice Wonder")),
                (employment::ROLE_TITLE, FieldValue::text("Designer")),
                (employment::START_DATE, FieldValue::text("2023-01-10")),
                (employment::SALARY, FieldValue::text("$110,000")),
                (employment::REMOTE, FieldValue::Flag(true)),
                (employment::SIG_EMPLOYEE, FieldValue::text("Alice Wonder")),
            ],
            now - Duration::days(300),
            now,
        ),
    ];

    DemoData {
        blueprints: vec![nda, employment],
        contracts,
    }
}

fn nda_blueprint(now: DateTime<Utc>) -> Blueprint {
    use nda::*;

    let content_template = format!(
        r#"NON-DISCLOSURE AGREEMENT

This Non-Disclosure Agreement (the "Agreement") is entered into by and between {{{{{DISCLOSING_PARTY}}}}} ("Disclosing Party") and {{{{{RECEIVING_PARTY}}}}} ("Receiving Party") for the purpose of preventing the unauthorized disclosure of Confidential Information as defined below.

1. Definition of Confidential Information. For purposes of this Agreement, "Confidential Information" shall include all information or material that has or could have commercial value or other utility in the business in which Disclosing Party is engaged.

2. Obligations of Receiving Party. Receiving Party shall hold and maintain the Confidential Information in strictest confidence for the sole and exclusive benefit of Disclosing Party.

3. Effective Date. This Agreement shall be effective as of {{{{{EFFECTIVE_DATE}}}}}.

IN WITNESS WHEREOF, the parties have executed this Agreement as of the date first above written.

Disclosing Party:
{{{{{SIG_DISCLOSING}}}}}

Receiving Party:
{{{{{SIG_RECEIVING}}}}}"#
    );

    Blueprint {
        id: NDA_BLUEPRINT_ID.to_string(),
        name: "Standard Non-Disclosure Agreement".to_string(),
        description: Some("Mutual NDA for business discussions.".to_string()),
        content_template: Some(content_template),
        fields: vec![
            FieldDefinition::new(DISCLOSING_PARTY, FieldType::Text, "Disclosing Party", true, 20.0, 20.0),
            FieldDefinition::new(RECEIVING_PARTY, FieldType::Text, "Receiving Party", true, 300.0, 20.0),
            FieldDefinition::new(EFFECTIVE_DATE, FieldType::Date, "Effective Date", true, 20.0, 100.0),
            FieldDefinition::new(NON_SOLICIT, FieldType::Checkbox, "Include Non-Solicit Clause", false, 20.0, 180.0),
            FieldDefinition::new(SIG_DISCLOSING, FieldType::Signature, "Signature (Disclosing)", true, 20.0, 300.0),
            FieldDefinition::new(SIG_RECEIVING, FieldType::Signature, "Signature (Receiving)", true, 300.0, 300.0),
        ],
        created_at: now,
    }
}

fn employment_blueprint(now: DateTime<Utc>) -> Blueprint {
    use employment::*;

    let content_template = format!(
        r#"EMPLOYMENT AGREEMENT

This Employment Agreement (the "Agreement") is made and entered into between Company Inc. ("Employer") and {{{{{EMPLOYEE_NAME}}}}} ("Employee").

1. Position. Employee is being hired for the position of {{{{{ROLE_TITLE}}}}}.

2. Start Date. Employee's employment with Employer shall commence on {{{{{START_DATE}}}}}.

3. Compensation. Employee shall be paid a base salary of {{{{{SALARY}}}}} per year, payable in accordance with Employer's standard payroll schedule.

4. Remote Work.
Remote Position: {{{{{REMOTE}}}}}

IN WITNESS WHEREOF, the parties have executed this Agreement.

Employee Signature:
{{{{{SIG_EMPLOYEE}}}}}"#
    );

    Blueprint {
        id: EMPLOYMENT_BLUEPRINT_ID.to_string(),
        name: "Employment Contract".to_string(),
        description: Some("Standard full-time employment agreement.".to_string()),
        content_template: Some(content_template),
        fields: vec![
            FieldDefinition::new(EMPLOYEE_NAME, FieldType::Text, "Employee Name", true, 20.0, 20.0),
            FieldDefinition::new(ROLE_TITLE, FieldType::Text, "Role Title", true, 300.0, 20.0),
            FieldDefinition::new(START_DATE, FieldType::Date, "Start Date", true, 20.0, 100.0),
            FieldDefinition::new(SALARY, FieldType::Text, "Annual Salary", true, 300.0, 100.0),
            FieldDefinition::new(REMOTE, FieldType::Checkbox, "Remote Position", false, 20.0, 180.0),
            FieldDefinition::new(SIG_EMPLOYEE, FieldType::Signature, "Employee Signature", true, 20.0, 300.0),
        ],
        created_at: now,
    }
}

fn contract(
    id: &str,
    blueprint: &Blueprint,
    name: &str,
    status: ContractStatus,
    values: &[(&str, FieldValue)],
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Contract {
    let values: ValueMap = values
        .iter()
        .map(|(field_id, value)| (field_id.to_string(), value.clone()))
        .collect();

    let mut contract = Contract::new(id, blueprint, name, values, created_at);
    contract.status = status;
    contract.updated_at = updated_at;
    contract
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_templates::{resolve_template, BLANK_PLACEHOLDER};
    use std::collections::HashSet;

    #[test]
    fn test_every_status_is_covered() {
        let data = demo_data();
        let statuses: HashSet<_> = data.contracts.iter().map(|c| c.status).collect();
        assert_eq!(statuses.len(), ContractStatus::ALL.len());
    }

    #[test]
    fn test_contracts_reference_seeded_blueprints() {
        let data = demo_data();
        for contract in &data.contracts {
            let blueprint = data
                .blueprints
                .iter()
                .find(|b| b.id == contract.blueprint_id)
                .unwrap();
            assert_eq!(contract.blueprint_name, blueprint.name);
            for field_id in contract.values.keys() {
                assert!(blueprint.field(field_id).is_some(), "{field_id}");
            }
        }
    }

    #[test]
    fn test_templates_reference_field_ids() {
        let data = demo_data();
        let offer = data
            .contracts
            .iter()
            .find(|c| c.id == "contract-offer-jane")
            .unwrap();
        let blueprint = &data.blueprints[1];

        let body = resolve_template(
            blueprint.content_template.as_deref().unwrap(),
            &offer.values,
            Some(blueprint.fields.as_slice()),
        );
        assert!(body.contains("and Jane Doe (\"Employee\")"));
        assert!(body.contains("Remote Position: [x] Yes"));
        assert!(body.ends_with(&format!("Employee Signature:\n{BLANK_PLACEHOLDER}")));
    }
}
