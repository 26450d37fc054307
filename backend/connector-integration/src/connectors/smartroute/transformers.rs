//! Field-map assembly and response decoding for SmartRoute messages.

use common_utils::{
    types::{AmountConvertor, StringMinorUnitForGateway},
    CustomResult, PeekInterface,
};
use domain_types::{
    connector_types::{
        DirectPostPaymentData, InquiryReceipt, PaymentMethod, PaymentPrepareData, PaymentReceipt,
        RedirectPaymentData, RefundData, RefundReceipt, TamperIndication, TransactionInquiryData,
        TransactionOutcome,
    },
    errors::ConnectorError,
    fields::FieldMap,
    types::GatewaySettings,
};
use error_stack::ResultExt;
use rust_decimal::Decimal;

use super::{constants, secure_hash, secure_hash::SecureHashProfile};

fn convert_amount(amount: Decimal) -> CustomResult<String, ConnectorError> {
    StringMinorUnitForGateway
        .convert(amount)
        .change_context(ConnectorError::InvalidDataFormat {
            field_name: constants::AMOUNT,
        })
        .map(|minor| minor.into_inner())
}

fn require_card_field<'a>(
    value: &'a str,
    field_name: &'static str,
) -> CustomResult<&'a str, ConnectorError> {
    if value.trim().is_empty() {
        return Err(error_stack::report!(ConnectorError::MissingRequiredField {
            field_name,
        }));
    }
    Ok(value)
}

/// Fixed and configured fields shared by the direct-post request shapes.
fn direct_post_base_fields(
    settings: &GatewaySettings,
    transaction_id: &str,
    amount: Decimal,
    message_id: &str,
    payment_method: PaymentMethod,
    payment_description: Option<&str>,
    item_id: Option<&str>,
) -> CustomResult<FieldMap, ConnectorError> {
    let mut fields = FieldMap::new();
    fields.insert(constants::TRANSACTION_ID, transaction_id);
    fields.insert(constants::MERCHANT_ID, settings.merchant_id.as_str());
    fields.insert(constants::AMOUNT, convert_amount(amount)?);
    fields.insert(
        constants::CURRENCY_ISO_CODE,
        settings.currency_iso_code.as_str(),
    );
    fields.insert(constants::MESSAGE_ID, message_id);
    fields.insert(constants::QUANTITY, settings.quantity.to_string());
    fields.insert(constants::CHANNEL, settings.channel.as_code());
    fields.insert(constants::PAYMENT_METHOD, payment_method.as_code());
    fields.insert(constants::LANGUAGE, settings.language.as_str());
    fields.insert(constants::VERSION, settings.version.as_str());
    fields.insert_optional(constants::THEME_ID, settings.theme_id.as_deref());
    fields.insert_optional(
        constants::RESPONSE_BACK_URL,
        settings.response_back_url.as_ref().map(url::Url::as_str),
    );
    fields.insert_optional(constants::PAYMENT_DESCRIPTION, payment_description);
    fields.insert_optional(constants::ITEM_ID, item_id);
    Ok(fields)
}

/// Signable field set for the browser direct-post form. The client appends
/// card data itself; nothing sensitive leaves here.
pub fn build_prepare_payment_fields(
    settings: &GatewaySettings,
    data: &PaymentPrepareData,
    transaction_id: &str,
) -> CustomResult<FieldMap, ConnectorError> {
    let mut fields = direct_post_base_fields(
        settings,
        transaction_id,
        data.amount,
        data.message_type.as_code(),
        data.payment_method,
        data.payment_description.as_deref(),
        data.item_id.as_deref(),
    )?;
    let hash = secure_hash::generate(
        &fields,
        &settings.authentication_token,
        SecureHashProfile::DirectPost,
    )?;
    fields.insert(constants::SECURE_HASH, hash);
    Ok(fields)
}

/// Full server-to-server direct-post request, card data included. The hash
/// is computed before the card fields are appended; the signing profile
/// excludes them either way.
pub fn build_direct_post_fields(
    settings: &GatewaySettings,
    data: &DirectPostPaymentData,
    transaction_id: &str,
) -> CustomResult<FieldMap, ConnectorError> {
    let card_number = require_card_field(data.card.card_number.peek(), constants::CARD_NUMBER)?;
    let expiry_year =
        require_card_field(data.card.expiry_year.peek(), constants::EXPIRY_DATE_YEAR)?;
    let expiry_month =
        require_card_field(data.card.expiry_month.peek(), constants::EXPIRY_DATE_MONTH)?;
    let security_code =
        require_card_field(data.card.security_code.peek(), constants::SECURITY_CODE)?;
    let card_holder_name =
        require_card_field(data.card.card_holder_name.peek(), constants::CARD_HOLDER_NAME)?;

    let mut fields = direct_post_base_fields(
        settings,
        transaction_id,
        data.amount,
        data.message_type.as_code(),
        data.payment_method,
        data.payment_description.as_deref(),
        data.item_id.as_deref(),
    )?;
    let hash = secure_hash::generate(
        &fields,
        &settings.authentication_token,
        SecureHashProfile::DirectPost,
    )?;
    fields.insert(constants::SECURE_HASH, hash);

    fields.insert(constants::CARD_NUMBER, card_number);
    fields.insert(constants::EXPIRY_DATE_YEAR, expiry_year);
    fields.insert(constants::EXPIRY_DATE_MONTH, expiry_month);
    fields.insert(constants::SECURITY_CODE, security_code);
    fields.insert(constants::CARD_HOLDER_NAME, card_holder_name);
    Ok(fields)
}

/// Field set for the redirect-model payment page form.
pub fn build_redirect_fields(
    settings: &GatewaySettings,
    data: &RedirectPaymentData,
    transaction_id: &str,
) -> CustomResult<FieldMap, ConnectorError> {
    let mut fields = FieldMap::new();
    fields.insert(constants::MESSAGE_ID, constants::MESSAGE_ID_REDIRECT_PAYMENT);
    fields.insert(constants::TRANSACTION_ID, transaction_id);
    fields.insert(constants::MERCHANT_ID, settings.merchant_id.as_str());
    fields.insert(constants::AMOUNT, convert_amount(data.amount)?);
    fields.insert(
        constants::CURRENCY_ISO_CODE,
        settings.currency_iso_code.as_str(),
    );
    fields.insert(
        constants::LANGUAGE,
        data.language.as_deref().unwrap_or(settings.language.as_str()),
    );
    fields.insert(constants::VERSION, settings.version.as_str());
    fields.insert(constants::CHANNEL, settings.channel.as_code());
    fields.insert(constants::QUANTITY, settings.quantity.to_string());
    fields.insert_optional(constants::THEME_ID, settings.theme_id.as_deref());
    fields.insert_optional(
        constants::PAYMENT_DESCRIPTION,
        data.payment_description.as_deref(),
    );
    fields.insert_optional(constants::ITEM_ID, data.item_id.as_deref());
    let response_back_url = data
        .response_back_url
        .clone()
        .or_else(|| settings.response_back_url.as_ref().map(url::Url::to_string));
    fields.insert_optional(constants::RESPONSE_BACK_URL, response_back_url.as_deref());
    fields.insert_optional(
        constants::FAILED_PAYMENT_REPLY_URL,
        settings
            .failed_payment_reply_url
            .as_ref()
            .map(url::Url::as_str),
    );
    fields.insert_optional(constants::GENERATE_TOKEN, data.generate_token.as_deref());
    fields.insert_optional(constants::TOKEN, data.token.as_deref());
    fields.insert_optional(constants::AGREEMENT_ID, data.agreement_id.as_deref());
    fields.insert_optional(constants::AGREEMENT_TYPE, data.agreement_type.as_deref());
    fields.insert_optional(
        constants::PREFERRED_PAYMENT_METHOD,
        data.preferred_payment_method.as_deref(),
    );

    let hash = secure_hash::generate(
        &fields,
        &settings.authentication_token,
        SecureHashProfile::RedirectB2b,
    )?;
    fields.insert(constants::SECURE_HASH, hash);
    Ok(fields)
}

/// Field set for the B2B transaction inquiry.
pub fn build_inquiry_fields(
    settings: &GatewaySettings,
    data: &TransactionInquiryData,
) -> CustomResult<FieldMap, ConnectorError> {
    if data.original_transaction_id.trim().is_empty() {
        return Err(error_stack::report!(ConnectorError::MissingRequiredField {
            field_name: constants::ORIGINAL_TRANSACTION_ID,
        }));
    }
    let mut fields = FieldMap::new();
    fields.insert(constants::MESSAGE_ID, constants::MESSAGE_ID_INQUIRY);
    fields.insert(constants::MERCHANT_ID, settings.merchant_id.as_str());
    fields.insert(
        constants::ORIGINAL_TRANSACTION_ID,
        data.original_transaction_id.as_str(),
    );
    fields.insert(constants::VERSION, settings.version.as_str());
    fields.insert_optional(
        constants::INCLUDE_REFUND_IDS,
        data.include_refund_ids.as_deref(),
    );

    let hash = secure_hash::generate(
        &fields,
        &settings.authentication_token,
        SecureHashProfile::RedirectB2b,
    )?;
    fields.insert(constants::SECURE_HASH, hash);
    Ok(fields)
}

/// Field set for the B2B refund.
pub fn build_refund_fields(
    settings: &GatewaySettings,
    data: &RefundData,
    refund_transaction_id: &str,
) -> CustomResult<FieldMap, ConnectorError> {
    if data.original_transaction_id.trim().is_empty() {
        return Err(error_stack::report!(ConnectorError::MissingRequiredField {
            field_name: constants::ORIGINAL_TRANSACTION_ID,
        }));
    }
    let mut fields = FieldMap::new();
    fields.insert(constants::MESSAGE_ID, constants::MESSAGE_ID_REFUND);
    fields.insert(constants::TRANSACTION_ID, refund_transaction_id);
    fields.insert(constants::MERCHANT_ID, settings.merchant_id.as_str());
    fields.insert(
        constants::CURRENCY_ISO_CODE,
        settings.currency_iso_code.as_str(),
    );
    fields.insert(constants::AMOUNT, convert_amount(data.amount)?);
    fields.insert(constants::VERSION, settings.version.as_str());
    fields.insert(
        constants::ORIGINAL_TRANSACTION_ID,
        data.original_transaction_id.as_str(),
    );
    fields.insert_optional(constants::SUB_PUN, data.sub_pun.as_deref());

    let hash = secure_hash::generate(
        &fields,
        &settings.authentication_token,
        SecureHashProfile::RedirectB2b,
    )?;
    fields.insert(constants::SECURE_HASH, hash);
    Ok(fields)
}

/// Decode an ampersand-delimited, percent-encoded response body.
///
/// Pairs without `=` are dropped silently; one malformed pair never fails
/// the whole parse. Only fields under the `Response.` namespace are kept.
pub fn parse_response_fields(body: &str) -> FieldMap {
    body.split('&')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = urlencoding::decode(name).ok()?.into_owned();
            let value = urlencoding::decode(value).ok()?.into_owned();
            is_response_field(&name).then_some((name, value))
        })
        .collect()
}

fn is_response_field(name: &str) -> bool {
    let prefix = constants::RESPONSE_PREFIX.as_bytes();
    name.as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Authenticate a decoded response and classify the result.
///
/// `success_field` names the sentinel checked against `00000`: the status
/// code for payment and refund replies, the message status for inquiries.
pub fn classify_response<R>(
    fields: &FieldMap,
    settings: &GatewaySettings,
    profile: SecureHashProfile,
    success_field: &str,
    build_receipt: impl FnOnce(&FieldMap) -> R,
) -> CustomResult<TransactionOutcome<R>, ConnectorError> {
    let received_hash = match fields.get(constants::RESPONSE_SECURE_HASH) {
        Some(hash) => hash.to_string(),
        None => {
            tracing::error!("gateway reply carried no secure hash; refusing to trust it");
            return Ok(TransactionOutcome::Tampered {
                reason: TamperIndication::SecureHashMissing,
            });
        }
    };

    // The gateway answers a bad request hash with status 00018 and does not
    // sign that reply against our field set, so it is classified before
    // verification.
    if fields.get(constants::RESPONSE_STATUS_CODE)
        == Some(constants::STATUS_REQUEST_HASH_REJECTED)
    {
        let status_description = fields
            .get(constants::RESPONSE_STATUS_DESCRIPTION)
            .unwrap_or("the gateway rejected the request secure hash")
            .to_string();
        tracing::error!(
            %status_description,
            "request secure hash rejected by the gateway; check token, field set and ordering"
        );
        return Ok(TransactionOutcome::RequestSignatureRejected { status_description });
    }

    let verifiable = secure_hash::encode_descriptions_for_verification(fields);
    let valid = secure_hash::verify(
        &verifiable,
        &received_hash,
        &settings.authentication_token,
        profile,
    )?;
    if !valid {
        tracing::error!("gateway reply failed secure hash verification");
        return Ok(TransactionOutcome::Tampered {
            reason: TamperIndication::SecureHashMismatch,
        });
    }

    let sentinel = fields.get(success_field).unwrap_or_default();
    if sentinel == constants::STATUS_SUCCESS {
        Ok(TransactionOutcome::Approved(build_receipt(fields)))
    } else {
        Ok(TransactionOutcome::Declined {
            status_code: sentinel.to_string(),
            status_description: fields
                .get(constants::RESPONSE_STATUS_DESCRIPTION)
                .unwrap_or_default()
                .to_string(),
            receipt: build_receipt(fields),
        })
    }
}

fn optional(fields: &FieldMap, name: &str) -> Option<String> {
    fields.get(name).map(str::to_string)
}

pub fn payment_receipt_from_fields(fields: &FieldMap) -> PaymentReceipt {
    PaymentReceipt {
        transaction_id: optional(fields, constants::RESPONSE_TRANSACTION_ID),
        merchant_id: optional(fields, constants::RESPONSE_MERCHANT_ID),
        message_id: optional(fields, constants::RESPONSE_MESSAGE_ID),
        amount: optional(fields, constants::RESPONSE_AMOUNT),
        currency_iso_code: optional(fields, constants::RESPONSE_CURRENCY_ISO_CODE),
        status_code: optional(fields, constants::RESPONSE_STATUS_CODE),
        status_description: optional(fields, constants::RESPONSE_STATUS_DESCRIPTION),
        gateway_status_code: optional(fields, constants::RESPONSE_GATEWAY_STATUS_CODE),
        gateway_status_description: optional(
            fields,
            constants::RESPONSE_GATEWAY_STATUS_DESCRIPTION,
        ),
        gateway_name: optional(fields, constants::RESPONSE_GATEWAY_NAME),
        approval_code: optional(fields, constants::RESPONSE_APPROVAL_CODE),
        rrn: optional(fields, constants::RESPONSE_RRN),
        masked_card_number: optional(fields, constants::RESPONSE_CARD_NUMBER),
        card_expiry_date: optional(fields, constants::RESPONSE_CARD_EXPIRY_DATE),
        card_holder_name: optional(fields, constants::RESPONSE_CARD_HOLDER_NAME),
        token: optional(fields, constants::RESPONSE_TOKEN),
        issuer_name: optional(fields, constants::RESPONSE_ISSUER_NAME),
        payment_method: optional(fields, constants::RESPONSE_PAYMENT_METHOD),
        processed_at: common_utils::date_time::now(),
    }
}

pub fn inquiry_receipt_from_fields(fields: &FieldMap) -> InquiryReceipt {
    InquiryReceipt {
        message_status: optional(fields, constants::RESPONSE_MESSAGE_STATUS),
        status_code: optional(fields, constants::RESPONSE_STATUS_CODE),
        transaction_id: optional(fields, constants::RESPONSE_TRANSACTION_ID),
        merchant_id: optional(fields, constants::RESPONSE_MERCHANT_ID),
        message_id: optional(fields, constants::RESPONSE_MESSAGE_ID),
        amount: optional(fields, constants::RESPONSE_AMOUNT),
        currency_iso_code: optional(fields, constants::RESPONSE_CURRENCY_ISO_CODE),
        authorized_amount: optional(fields, constants::RESPONSE_AUTHORIZED_AMOUNT),
        authorized_currency_iso_code: optional(
            fields,
            constants::RESPONSE_AUTHORIZED_CURRENCY_ISO_CODE,
        ),
        reversal_status: optional(fields, constants::RESPONSE_REVERSAL_STATUS),
        refund_status: optional(fields, constants::RESPONSE_REFUND_STATUS),
        refund_ids: optional(fields, constants::RESPONSE_REFUND_IDS),
        gateway_status_code: optional(fields, constants::RESPONSE_GATEWAY_STATUS_CODE),
        gateway_status_description: optional(
            fields,
            constants::RESPONSE_GATEWAY_STATUS_DESCRIPTION,
        ),
        gateway_name: optional(fields, constants::RESPONSE_GATEWAY_NAME),
        approval_code: optional(fields, constants::RESPONSE_APPROVAL_CODE),
        rrn: optional(fields, constants::RESPONSE_RRN),
        masked_card_number: optional(fields, constants::RESPONSE_CARD_NUMBER),
        card_expiry_date: optional(fields, constants::RESPONSE_CARD_EXPIRY_DATE),
        card_holder_name: optional(fields, constants::RESPONSE_CARD_HOLDER_NAME),
        issuer_name: optional(fields, constants::RESPONSE_ISSUER_NAME),
        payment_method: optional(fields, constants::RESPONSE_PAYMENT_METHOD),
        processed_at: common_utils::date_time::now(),
    }
}

pub fn refund_receipt_from_fields(fields: &FieldMap) -> RefundReceipt {
    RefundReceipt {
        refund_transaction_id: optional(fields, constants::RESPONSE_TRANSACTION_ID),
        original_transaction_id: optional(fields, constants::RESPONSE_ORIGINAL_TRANSACTION_ID),
        merchant_id: optional(fields, constants::RESPONSE_MERCHANT_ID),
        message_id: optional(fields, constants::RESPONSE_MESSAGE_ID),
        amount: optional(fields, constants::RESPONSE_AMOUNT),
        currency_iso_code: optional(fields, constants::RESPONSE_CURRENCY_ISO_CODE),
        status_code: optional(fields, constants::RESPONSE_STATUS_CODE),
        status_description: optional(fields, constants::RESPONSE_STATUS_DESCRIPTION),
        sub_pun: optional(fields, constants::RESPONSE_SUB_PUN),
        rrn: optional(fields, constants::RESPONSE_RRN),
        processed_at: common_utils::date_time::now(),
    }
}
