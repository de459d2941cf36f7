use posit_core::score::Score;
use posit_predict::Predictions;

use crate::ConsultationService;
use crate::error::ServiceError;

impl ConsultationService {
    /// Love, health and work predictions for a client, from their lucky
    /// color and totem animal and three 1-4 scores.
    ///
    /// Returns `Ok(None)` when the prediction gateway fails; that failure is
    /// logged and not retried.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Core` for a score outside 1-4 and
    /// `ServiceError::NotFound` for an unknown client.
    pub async fn predictions_for(
        &self,
        client_id: &str,
        love: u8,
        health: u8,
        work: u8,
    ) -> Result<Option<Predictions>, ServiceError> {
        let (love, health, work) = (Score::new(love)?, Score::new(health)?, Score::new(work)?);
        let client = self
            .get_client(client_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("client", client_id))?;

        match self.predictions.predict(
            &client.astral.lucky_color,
            &client.astral.totem_animal,
            love,
            health,
            work,
        ) {
            Ok(predictions) => Ok(Some(predictions)),
            Err(error) => {
                tracing::warn!(client_id, %error, "prediction gateway failed");
                Ok(None)
            }
        }
    }
}
