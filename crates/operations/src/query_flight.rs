//! QueryFlight: searches flights, first page of ten.
//!
//! Input: `airportFrom, airportTo, dateFrom, dateTo, numberOfPeople, oneWay`.

use async_trait::async_trait;
use flightdesk_backend::{BackendClient, FlightQueryRequest, Page};
use flightdesk_core::{FieldSpec, Operation, OperationResult, Session};
use std::sync::Arc;

use crate::args::{ArgumentError, ArgumentSchema};
use crate::passthrough;

const ERROR_PREFIX: &str = "Flight query error";
const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("airportFrom"),
    FieldSpec::text("airportTo"),
    FieldSpec::text("dateFrom"),
    FieldSpec::text("dateTo"),
    FieldSpec::integer("numberOfPeople"),
    FieldSpec::flag("oneWay"),
];
const SCHEMA: ArgumentSchema = ArgumentSchema::new(
    FIELDS,
    "Invalid input. Format: airportFrom, airportTo, dateFrom, dateTo, numberOfPeople, oneWay (e.g., true/false)",
);

fn parse_request(argument: &str) -> Result<FlightQueryRequest, ArgumentError> {
    let args = SCHEMA.parse(argument)?;
    Ok(FlightQueryRequest {
        airport_from: args.text("airportFrom")?,
        airport_to: args.text("airportTo")?,
        date_from: args.text("dateFrom")?,
        date_to: args.text("dateTo")?,
        number_of_people: args.integer("numberOfPeople")?,
        one_way: args.flag("oneWay")?,
    })
}

pub struct QueryFlightOperation {
    backend: Arc<BackendClient>,
}

impl QueryFlightOperation {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Operation for QueryFlightOperation {
    fn name(&self) -> &str {
        "QueryFlight"
    }

    fn description(&self) -> &str {
        "Use this to query a flight. Input format: airportFrom, airportTo, dateFrom, dateTo, \
         numberOfPeople, oneWay (e.g., Istanbul, Ankara, 2025-05-20T10:00:00Z, \
         2025-05-22T18:00:00Z, 1, true)"
    }

    fn fields(&self) -> &[FieldSpec] {
        FIELDS
    }

    async fn invoke(&self, session: &Session, argument: &str) -> OperationResult {
        let request = match parse_request(argument) {
            Ok(r) => r,
            Err(e) => return e.render(ERROR_PREFIX).into(),
        };

        passthrough(
            self.name(),
            ERROR_PREFIX,
            self.backend
                .query_flights(&request, &session.token(), Page::default())
                .await,
        )
    }
}
