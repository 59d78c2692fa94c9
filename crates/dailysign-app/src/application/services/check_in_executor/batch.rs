use log::info;
use tracing::instrument;

use dailysign_domain::check_in::RunReport;
use dailysign_domain::Account;

use super::CheckInExecutor;

impl CheckInExecutor {
    /// Check in every account, one at a time, in list order
    ///
    /// Produces exactly one record per account; a failure for one account
    /// never stops the ones after it.
    #[instrument(skip_all, fields(batch_size = accounts.len()))]
    pub async fn execute_all(&self, accounts: &[Account]) -> RunReport {
        info!("共 {} 个账号待签到", accounts.len());

        let mut records = Vec::with_capacity(accounts.len());
        for account in accounts {
            records.push(self.execute_check_in(account).await);
        }

        let report = RunReport::from_records(records);
        info!(
            "签到完成: 共 {} 个账号, 成功 {} 个, 失败 {} 个",
            report.total(),
            report.succeeded,
            report.failed
        );
        report
    }
}
