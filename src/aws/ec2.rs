//! EC2 inventory and security group deletion

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::{AwsError, classify_sdk_error};
use crate::aws::types::{Instance, NetworkInterface, Reservation, SecurityGroup};
use aws_sdk_ec2::{Client, types};
use tracing::debug;

/// EC2 client for inventory and security group cleanup
pub struct Ec2Client {
    client: Client,
}

impl FromAwsContext for Ec2Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
        }
    }
}

impl Ec2Client {
    /// Describe every security group visible to the caller.
    ///
    /// Groups missing an id are skipped; a missing name is kept as empty.
    pub async fn describe_security_groups(&self) -> Result<Vec<SecurityGroup>, AwsError> {
        let mut groups = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .describe_security_groups()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| classify_sdk_error(&e))?;

            groups.extend(response.security_groups().iter().filter_map(security_group_from_sdk));

            match non_empty(response.next_token()) {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        debug!(count = groups.len(), "Described security groups");
        Ok(groups)
    }

    /// Describe every network interface and its attached groups
    pub async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterface>, AwsError> {
        let mut interfaces = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .describe_network_interfaces()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| classify_sdk_error(&e))?;

            interfaces.extend(
                response
                    .network_interfaces()
                    .iter()
                    .map(network_interface_from_sdk),
            );

            match non_empty(response.next_token()) {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        debug!(count = interfaces.len(), "Described network interfaces");
        Ok(interfaces)
    }

    /// Describe every instance, grouped by reservation
    pub async fn describe_instances(&self) -> Result<Vec<Reservation>, AwsError> {
        let mut reservations = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .describe_instances()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| classify_sdk_error(&e))?;

            reservations.extend(response.reservations().iter().map(reservation_from_sdk));

            match non_empty(response.next_token()) {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        debug!(count = reservations.len(), "Described instance reservations");
        Ok(reservations)
    }

    /// Delete a security group. One attempt; callers decide on retries.
    pub async fn delete_security_group(&self, group_id: &str) -> Result<(), AwsError> {
        debug!(sg_id = %group_id, "Deleting security group");

        self.client
            .delete_security_group()
            .group_id(group_id)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(())
    }
}

fn non_empty(token: Option<&str>) -> Option<String> {
    token.filter(|t| !t.is_empty()).map(str::to_string)
}

fn group_ids(groups: &[types::GroupIdentifier]) -> Vec<String> {
    groups
        .iter()
        .filter_map(|g| g.group_id())
        .map(str::to_string)
        .collect()
}

pub(crate) fn security_group_from_sdk(sg: &types::SecurityGroup) -> Option<SecurityGroup> {
    let Some(group_id) = sg.group_id() else {
        debug!(name = ?sg.group_name(), "Skipping security group without an id");
        return None;
    };
    Some(SecurityGroup::new(group_id, sg.group_name().unwrap_or_default()))
}

pub(crate) fn network_interface_from_sdk(eni: &types::NetworkInterface) -> NetworkInterface {
    NetworkInterface {
        interface_id: eni.network_interface_id().map(str::to_string),
        group_ids: group_ids(eni.groups()),
    }
}

pub(crate) fn reservation_from_sdk(reservation: &types::Reservation) -> Reservation {
    Reservation {
        instances: reservation
            .instances()
            .iter()
            .map(|instance| Instance {
                instance_id: instance.instance_id().map(str::to_string),
                group_ids: group_ids(instance.security_groups()),
            })
            .collect(),
    }
}
