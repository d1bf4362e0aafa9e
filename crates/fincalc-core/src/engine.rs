//! Transport-agnostic entry point: one tagged request enum, one dispatch
//! function. The surrounding HTTP or UI layer deserializes into
//! [`CalculationRequest`] and serializes the response straight back out.
//! Adding a calculator means one new pure-function contract and one variant
//! here.

use serde::{Deserialize, Serialize};

use crate::format;
use crate::EngineResult;

#[cfg(feature = "emi")]
use crate::emi::{self, LoanPortfolioRequest, LoanRequest};
#[cfg(feature = "sip")]
use crate::sip::{self, SipRequest};

/// A calculation request, tagged by the `calculation` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "calculation", rename_all = "camelCase")]
pub enum CalculationRequest {
    #[cfg(feature = "emi")]
    Emi(LoanRequest),
    #[cfg(feature = "emi")]
    EmiPortfolio(LoanPortfolioRequest),
    #[cfg(feature = "sip")]
    Sip(SipRequest),
}

/// The matching formatted response, serialized without a tag.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CalculationResponse {
    #[cfg(feature = "emi")]
    Emi(format::EmiResponse),
    #[cfg(feature = "emi")]
    EmiPortfolio(format::PortfolioResponse),
    #[cfg(feature = "sip")]
    Sip(format::SipResponse),
}

/// Route a request to its calculator and shape the response contract.
pub fn calculate(request: &CalculationRequest) -> EngineResult<CalculationResponse> {
    match request {
        #[cfg(feature = "emi")]
        CalculationRequest::Emi(req) => {
            let output = emi::calculate_loan(req)?;
            Ok(CalculationResponse::Emi(format::loan_response(
                req,
                &output.result,
            )))
        }
        #[cfg(feature = "emi")]
        CalculationRequest::EmiPortfolio(req) => {
            let output = emi::assess_loan_portfolio(req)?;
            Ok(CalculationResponse::EmiPortfolio(format::portfolio_response(
                &output.result,
            )))
        }
        #[cfg(feature = "sip")]
        CalculationRequest::Sip(req) => {
            let output = sip::project_sip(req)?;
            Ok(CalculationResponse::Sip(format::sip_response(&output.result)))
        }
    }
}
