use solana_account_decoder_client_types::UiAccountEncoding;
use solana_rpc_client::rpc_client::RpcClient;
use solana_rpc_client_api::client_error::Error as ClientError;
use solana_rpc_client_api::config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_rpc_client_api::filter::{Memcmp, RpcFilterType};
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::{Transaction, TransactionError};
use tracing::debug;

use crate::ledger::{AccountFilter, Delivery, Ledger, TransportError};

/// [`Ledger`] backed by a Solana JSON-RPC node.
pub struct RpcLedger {
    rpc: RpcClient,
}

impl RpcLedger {
    pub fn new(url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.into(), commitment),
        }
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

impl From<ClientError> for TransportError {
    fn from(error: ClientError) -> Self {
        TransportError(error.to_string())
    }
}

impl From<&AccountFilter> for RpcFilterType {
    fn from(filter: &AccountFilter) -> Self {
        match filter {
            AccountFilter::DataSize(size) => RpcFilterType::DataSize(*size),
            AccountFilter::Memcmp { offset, bytes } => {
                RpcFilterType::Memcmp(Memcmp::new_raw_bytes(*offset, bytes.clone()))
            }
        }
    }
}

impl Ledger for RpcLedger {
    fn deliver(&mut self, instructions: &[Instruction], signers: &[&Keypair]) -> Delivery {
        let Some(payer) = signers.first() else {
            return Delivery::Rejected(TransactionError::SignatureFailure);
        };
        let blockhash = match self.rpc.get_latest_blockhash() {
            Ok(blockhash) => blockhash,
            Err(error) => return Delivery::Unreachable(error.into()),
        };
        let mut transaction =
            Transaction::new_unsigned(Message::new(instructions, Some(&payer.pubkey())));
        if transaction.try_sign(signers, blockhash).is_err() {
            return Delivery::Rejected(TransactionError::SignatureFailure);
        }
        debug!(signature = %transaction.signatures[0], %blockhash, "sending transaction");

        match self.rpc.send_and_confirm_transaction(&transaction) {
            Ok(signature) => Delivery::Confirmed(signature),
            // Preflight and on-chain failures both carry the program's verdict.
            Err(error) => match error.get_transaction_error() {
                Some(rejection) => Delivery::Rejected(rejection),
                None => Delivery::Unreachable(error.into()),
            },
        }
    }

    fn minimum_balance(&self, data_len: usize) -> Result<u64, TransportError> {
        self.rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .map_err(Into::into)
    }

    fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError> {
        self.rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .map(|response| response.value)
            .map_err(Into::into)
    }

    fn scan_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Account)>, TransportError> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters.iter().map(Into::into).collect()),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.rpc.commitment()),
                ..Default::default()
            },
            ..Default::default()
        };

        self.rpc
            .get_program_accounts_with_config(program_id, config)
            .map_err(Into::into)
    }
}
